//! The environment this process is running as.
//!
//! Set it once at startup, either directly with [`set_current`] or from a
//! process variable with [`read_current_from_var`], then read it anywhere with
//! [`current`]. The value can be set only once; later attempts fail with
//! [`EnvError::AlreadySet`] and leave the stored value untouched.
//!
//! ```
//! use registry::{current, set_current, EnvironmentRegistry};
//!
//! let mut envs = EnvironmentRegistry::new();
//! envs.define_defaults()?;
//!
//! set_current(&envs, "production")?;
//! assert!(envs.is_production(current()));
//! assert!(set_current(&envs, "staging").is_err());
//! # Ok::<(), registry::EnvError>(())
//! ```

use crate::environment::Environment;
use crate::error::{EnvError, EnvResult};
use crate::registry::EnvironmentRegistry;
use crate::vars::{ReadEnv, SystemEnv};
use std::env::VarError;
use std::sync::OnceLock;
use tracing::{debug, warn};

static CURRENT: CurrentEnvironment = CurrentEnvironment::new();

/// A set-once holder for the active environment.
///
/// The process-wide instance sits behind the free functions in this module;
/// separate instances are useful in tests.
#[derive(Debug, Default)]
pub struct CurrentEnvironment {
    cell: OnceLock<Environment>,
}

impl CurrentEnvironment {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The process-wide instance used by [`set_current`] and [`current`].
    pub fn global() -> &'static Self {
        &CURRENT
    }

    /// Store `env` as the active environment.
    ///
    /// # Errors
    ///
    /// [`EnvError::AlreadySet`] if a value is already stored,
    /// [`EnvError::InvalidEnvironment`] if `env` is blank or not defined in
    /// `registry`.
    pub fn set(
        &self,
        registry: &EnvironmentRegistry,
        env: impl Into<Environment>,
    ) -> EnvResult<&Environment> {
        let env = env.into();

        if let Some(current) = self.cell.get() {
            return Err(already_set(current, &env));
        }

        if env.is_empty() {
            return Err(EnvError::InvalidEnvironment {
                environment: env.to_string(),
                reason: "environment must not be empty".to_string(),
            });
        }

        if !registry.is_valid(&env) {
            return Err(EnvError::InvalidEnvironment {
                environment: env.to_string(),
                reason: "not defined in the registry".to_string(),
            });
        }

        let mut stored_here = false;
        let stored = self.cell.get_or_init(|| {
            stored_here = true;
            env.clone()
        });

        if stored_here {
            debug!(environment = %stored, "current environment set");
            Ok(stored)
        } else {
            Err(already_set(stored, &env))
        }
    }

    /// Read the active environment from the variable `name` and store it.
    ///
    /// The variable's value is trimmed before validation.
    ///
    /// # Errors
    ///
    /// [`EnvError::MissingVariable`] if `name` is blank or the variable is
    /// unset, [`EnvError::NonUnicodeVariable`] if its value is not UTF-8, and
    /// anything [`CurrentEnvironment::set`] returns.
    pub fn read_from_var(
        &self,
        registry: &EnvironmentRegistry,
        reader: &impl ReadEnv,
        name: &str,
    ) -> EnvResult<&Environment> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EnvError::MissingVariable {
                name: name.to_string(),
            });
        }

        let value = reader.var(name).map_err(|e| match e {
            VarError::NotPresent => EnvError::MissingVariable {
                name: name.to_string(),
            },
            VarError::NotUnicode(_) => EnvError::NonUnicodeVariable {
                name: name.to_string(),
            },
        })?;

        self.set(registry, value)
    }

    /// The active environment.
    ///
    /// # Panics
    ///
    /// Panics if no environment has been set. Callers must set it at startup
    /// before anything reads it; use [`CurrentEnvironment::try_get`] where
    /// that cannot be guaranteed.
    pub fn get(&self) -> &Environment {
        match self.cell.get() {
            Some(env) => env,
            None => panic!("current environment read before it was set"),
        }
    }

    pub fn try_get(&self) -> EnvResult<&Environment> {
        self.cell.get().ok_or(EnvError::NotInitialized)
    }

    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }
}

fn already_set(current: &Environment, attempted: &Environment) -> EnvError {
    warn!(%current, %attempted, "current environment already set");
    EnvError::AlreadySet {
        current: current.to_string(),
        attempted: attempted.to_string(),
    }
}

/// Set the process-wide current environment. See [`CurrentEnvironment::set`].
pub fn set_current(
    registry: &EnvironmentRegistry,
    env: impl Into<Environment>,
) -> EnvResult<&'static Environment> {
    CURRENT.set(registry, env)
}

/// Set the process-wide current environment from a process variable.
/// See [`CurrentEnvironment::read_from_var`].
pub fn read_current_from_var(
    registry: &EnvironmentRegistry,
    name: &str,
) -> EnvResult<&'static Environment> {
    CURRENT.read_from_var(registry, &SystemEnv, name)
}

/// The process-wide current environment.
///
/// # Panics
///
/// Panics if it has not been set yet.
pub fn current() -> &'static Environment {
    CURRENT.get()
}

pub fn try_current() -> EnvResult<&'static Environment> {
    CURRENT.try_get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::InMemoryEnv;

    fn registry() -> EnvironmentRegistry {
        let mut registry = EnvironmentRegistry::new();
        registry.define_defaults().unwrap();
        registry
    }

    #[test]
    fn test_set_once() {
        let registry = registry();
        let current = CurrentEnvironment::new();
        assert!(!current.is_set());

        let stored = current.set(&registry, "production").unwrap();
        assert_eq!(stored.as_str(), "production");

        let err = current.set(&registry, "staging").unwrap_err();
        assert!(matches!(err, EnvError::AlreadySet { .. }));
        assert_eq!(current.get().as_str(), "production");
    }

    #[test]
    fn test_already_set_wins_over_validation() {
        let registry = registry();
        let current = CurrentEnvironment::new();
        current.set(&registry, "local").unwrap();
        assert!(matches!(
            current.set(&registry, "unknown"),
            Err(EnvError::AlreadySet { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_and_undefined() {
        let registry = registry();
        let current = CurrentEnvironment::new();

        assert!(matches!(
            current.set(&registry, "  "),
            Err(EnvError::InvalidEnvironment { .. })
        ));
        assert!(matches!(
            current.set(&registry, "qa"),
            Err(EnvError::InvalidEnvironment { .. })
        ));
        assert!(!current.is_set());
    }

    #[test]
    fn test_try_get_before_set() {
        let current = CurrentEnvironment::new();
        assert!(matches!(current.try_get(), Err(EnvError::NotInitialized)));
    }

    #[test]
    #[should_panic(expected = "current environment read before it was set")]
    fn test_get_before_set_panics() {
        let current = CurrentEnvironment::new();
        let _ = current.get();
    }

    #[test]
    fn test_read_from_var() {
        let registry = registry();
        let vars = InMemoryEnv::new().with_var("APP_ENV", " staging \n");
        let current = CurrentEnvironment::new();

        let stored = current.read_from_var(&registry, &vars, "APP_ENV").unwrap();
        assert_eq!(stored.as_str(), "staging");
        assert!(!registry.is_local(current.get()));
    }

    #[test]
    fn test_read_from_var_blank_name() {
        let registry = registry();
        let current = CurrentEnvironment::new();
        let err = current
            .read_from_var(&registry, &InMemoryEnv::new(), "  ")
            .unwrap_err();
        assert!(matches!(err, EnvError::MissingVariable { .. }));
    }

    #[test]
    fn test_read_from_var_unset() {
        let registry = registry();
        let current = CurrentEnvironment::new();
        let err = current
            .read_from_var(&registry, &InMemoryEnv::new(), "MY_ENV")
            .unwrap_err();
        assert!(matches!(err, EnvError::MissingVariable { name } if name == "MY_ENV"));
        assert!(!current.is_set());
    }

    #[test]
    fn test_read_from_var_propagates_set_errors() {
        let registry = registry();
        let vars = InMemoryEnv::new().with_var("APP_ENV", "qa");
        let current = CurrentEnvironment::new();
        assert!(matches!(
            current.read_from_var(&registry, &vars, "APP_ENV"),
            Err(EnvError::InvalidEnvironment { .. })
        ));

        vars.set("APP_ENV", "local");
        current.read_from_var(&registry, &vars, "APP_ENV").unwrap();
        vars.set("APP_ENV", "production");
        assert!(matches!(
            current.read_from_var(&registry, &vars, "APP_ENV"),
            Err(EnvError::AlreadySet { .. })
        ));
        assert_eq!(current.get().as_str(), "local");
    }
}
