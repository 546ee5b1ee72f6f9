//! Environment identifiers and the categories they can be classified under.

use crate::casing::{self, Locale};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

pub const LOCAL: &str = "local";
pub const DEVELOPMENT: &str = "development";
pub const STAGING: &str = "staging";
pub const PRODUCTION: &str = "production";

/// A deployment environment label such as `production` or `staging`.
///
/// Surrounding whitespace is trimmed on construction, so `" qa "` and `"qa"`
/// name the same environment. Whether the label means anything is decided by
/// an [`EnvironmentRegistry`](crate::EnvironmentRegistry), not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Environment(String);

impl Environment {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase using English casing rules.
    pub fn upper(&self) -> String {
        self.upper_with(Locale::default())
    }

    pub fn upper_with(&self, locale: Locale) -> String {
        casing::upper(&self.0, locale)
    }

    /// Lowercase using English casing rules.
    pub fn lower(&self) -> String {
        self.lower_with(Locale::default())
    }

    pub fn lower_with(&self, locale: Locale) -> String {
        casing::lower(&self.0, locale)
    }

    /// Title case using English casing rules.
    pub fn title(&self) -> String {
        self.title_with(Locale::default())
    }

    pub fn title_with(&self, locale: Locale) -> String {
        casing::title(&self.0, locale)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.0
    }
}

impl AsRef<str> for Environment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Environment {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Mutually exclusive classification of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Local,
    Development,
    Production,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Local, Category::Development, Category::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Local => "local",
            Category::Development => "development",
            Category::Production => "production",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_trims_whitespace() {
        let env = Environment::new("  staging\n");
        assert_eq!(env.as_str(), "staging");
        assert_eq!(env, Environment::from("staging"));
        assert!(Environment::new("   ").is_empty());
    }

    #[test]
    fn test_default_casing() {
        let env = Environment::from(PRODUCTION);
        assert_eq!(env.upper(), "PRODUCTION");
        assert_eq!(env.title(), "Production");
        assert_eq!(Environment::from("PrOd").lower(), "prod");
    }

    #[test]
    fn test_locale_casing() {
        let env = Environment::from(STAGING);
        assert_eq!(env.upper_with(Locale::Turkish), "STAGİNG");
        assert_eq!(env.upper_with(Locale::English), "STAGING");
    }

    #[test]
    fn test_serde_trims_on_deserialize() {
        let env: Environment = serde_json::from_str("\" local \"").unwrap();
        assert_eq!(env.as_str(), "local");
        assert_eq!(serde_json::to_string(&env).unwrap(), "\"local\"");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Development.to_string(), "development");
        assert_eq!(
            serde_json::to_string(&Category::Production).unwrap(),
            "\"production\""
        );
        assert_eq!(Category::ALL.len(), 3);
    }
}
