//! Lookup seam for named process variables.
//!
//! [`SystemEnv`] reads the real process environment. [`InMemoryEnv`] is a
//! test double available under `cfg(test)` or the `test-support` feature.

use std::env::VarError;

/// # Thread Safety
///
/// Does **not** require `Send + Sync`. Add the bounds at your call site.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, VarError>;
}

/// Zero-sized type that delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use in_memory::InMemoryEnv;

#[cfg(any(test, feature = "test-support"))]
mod in_memory {
    use super::ReadEnv;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::env::VarError;

    #[derive(Debug, Default)]
    pub struct InMemoryEnv {
        vars: RefCell<HashMap<String, String>>,
    }

    impl InMemoryEnv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_var(self, key: impl Into<String>, value: impl Into<String>) -> Self {
            self.set(key, value);
            self
        }

        pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
            self.vars.borrow_mut().insert(key.into(), value.into());
        }

        pub fn remove(&self, key: &str) {
            self.vars.borrow_mut().remove(key);
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Result<String, VarError> {
            self.vars
                .borrow()
                .get(key)
                .cloned()
                .ok_or(VarError::NotPresent)
        }
    }
}
