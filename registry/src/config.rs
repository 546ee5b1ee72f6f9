use crate::environment::{Category, Environment};
use crate::error::{EnvError, EnvResult};
use crate::registry::EnvironmentRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_VARIABLE: &str = "APP_ENV";

/// Declarative description of a registry, usually loaded from TOML:
///
/// ```toml
/// include_defaults = true
/// variable = "APP_ENV"
/// local = ["laptop"]
/// production = ["prod-eu", "prod-us"]
/// other = ["preview"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub include_defaults: bool,
    pub variable: String,
    pub local: Vec<Environment>,
    pub development: Vec<Environment>,
    pub production: Vec<Environment>,
    pub other: Vec<Environment>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            variable: DEFAULT_VARIABLE.to_string(),
            local: vec![],
            development: vec![],
            production: vec![],
            other: vec![],
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> EnvResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EnvResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading registry config");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn with_defaults(mut self, include_defaults: bool) -> Self {
        self.include_defaults = include_defaults;
        self
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn with_local(mut self, env: impl Into<Environment>) -> Self {
        self.local.push(env.into());
        self
    }

    pub fn with_development(mut self, env: impl Into<Environment>) -> Self {
        self.development.push(env.into());
        self
    }

    pub fn with_production(mut self, env: impl Into<Environment>) -> Self {
        self.production.push(env.into());
        self
    }

    pub fn with_other(mut self, env: impl Into<Environment>) -> Self {
        self.other.push(env.into());
        self
    }

    fn categorized(&self) -> [(Category, &[Environment]); 3] {
        [
            (Category::Local, self.local.as_slice()),
            (Category::Development, self.development.as_slice()),
            (Category::Production, self.production.as_slice()),
        ]
    }

    pub fn validate(&self) -> EnvResult<()> {
        if self.variable.trim().is_empty() {
            return Err(EnvError::InvalidConfig {
                message: "variable name cannot be empty".to_string(),
            });
        }

        let mut seen: HashMap<&Environment, Category> = HashMap::new();
        for (category, envs) in self.categorized() {
            for env in envs.iter().filter(|env| !env.is_empty()) {
                match seen.insert(env, category) {
                    Some(existing) if existing != category => {
                        return Err(EnvError::InvalidConfig {
                            message: format!(
                                "'{env}' is listed as both '{existing}' and '{category}'"
                            ),
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Build a registry from this configuration.
    ///
    /// Defaults are registered first when enabled, so listing `local` under
    /// `production` fails with [`EnvError::CategoryConflict`].
    pub fn build_registry(&self) -> EnvResult<EnvironmentRegistry> {
        self.validate()?;

        let mut registry = EnvironmentRegistry::new();
        if self.include_defaults {
            registry.define_defaults()?;
        }
        for (category, envs) in self.categorized() {
            registry.define(category, envs.iter().cloned())?;
        }
        registry.define_all(self.other.iter().cloned());

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert!(config.include_defaults);
        assert_eq!(config.variable, "APP_ENV");
        assert!(config.validate().is_ok());

        let registry = config.build_registry().unwrap();
        assert!(registry.is_local("local"));
        assert!(registry.is_valid("staging"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_config_builder() {
        let config = RegistryConfig::new()
            .with_defaults(false)
            .with_variable("DEPLOY_ENV")
            .with_local("laptop")
            .with_development("dev-1")
            .with_production("prod-eu")
            .with_other("preview");

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 4);
        assert!(registry.is_local("laptop"));
        assert!(registry.is_development("dev-1"));
        assert!(registry.is_production("prod-eu"));
        assert!(registry.is_valid("preview"));
        assert!(!registry.is_valid("local"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RegistryConfig::default();

        config.variable = " ".to_string();
        assert!(config.validate().is_err());

        config.variable = DEFAULT_VARIABLE.to_string();
        config.local.push("shared".into());
        config.production.push("shared".into());
        assert!(matches!(
            config.validate(),
            Err(EnvError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_conflict_with_defaults() {
        let config = RegistryConfig::new().with_production("local");
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.build_registry(),
            Err(EnvError::CategoryConflict { .. })
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let config = RegistryConfig::from_toml_str(
            r#"
            include_defaults = false
            variable = "DEPLOY_ENV"
            local = ["laptop"]
            production = [" prod-eu ", "prod-us"]
            "#,
        )
        .unwrap();

        assert!(!config.include_defaults);
        assert_eq!(config.variable, "DEPLOY_ENV");
        assert_eq!(config.production[0].as_str(), "prod-eu");
        assert!(config.development.is_empty());
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_fields() {
        let result = RegistryConfig::from_toml_str("staging = [\"qa\"]");
        assert!(matches!(result, Err(EnvError::ConfigParse(_))));
    }

    #[test]
    fn test_serialization() {
        let config = RegistryConfig::new().with_local("laptop");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RegistryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
