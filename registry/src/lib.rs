//! Classification registry for deployment environments.
//!
//! An [`EnvironmentRegistry`] records which environment names exist and
//! whether each one is local, development or production, so code can ask
//! `registry.is_production(env)` instead of comparing strings. The
//! [`current`](mod@current) module holds the single environment this process
//! runs as.

pub mod casing;
pub mod config;
pub mod current;
pub mod environment;
pub mod error;
pub mod registry;
pub mod vars;

pub use casing::Locale;
pub use config::{RegistryConfig, DEFAULT_VARIABLE};
pub use current::{current, read_current_from_var, set_current, try_current, CurrentEnvironment};
pub use environment::{Category, Environment, DEVELOPMENT, LOCAL, PRODUCTION, STAGING};
pub use error::{EnvError, EnvResult};
pub use registry::EnvironmentRegistry;
pub use vars::{ReadEnv, SystemEnv};

#[cfg(any(test, feature = "test-support"))]
pub use vars::InMemoryEnv;

pub mod prelude {
    pub use crate::casing::*;
    pub use crate::config::*;
    pub use crate::current::*;
    pub use crate::environment::*;
    pub use crate::error::*;
    pub use crate::registry::*;
    pub use crate::vars::*;
}
