use clap::ValueEnum;
use registry::{
    Category, CurrentEnvironment, EnvError, Environment, EnvironmentRegistry, Locale, ReadEnv,
    RegistryConfig,
};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Case {
    Upper,
    Lower,
    Title,
}

/// What the registry knows about one environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentReport {
    pub environment: Environment,
    pub valid: bool,
    pub category: Option<Category>,
}

impl EnvironmentReport {
    pub fn new(registry: &EnvironmentRegistry, environment: Environment) -> Self {
        Self {
            valid: registry.is_valid(&environment),
            category: registry.category_of(&environment),
            environment,
        }
    }

    pub fn to_text(&self) -> String {
        match (self.valid, self.category) {
            (false, _) => format!("{}: not defined", self.environment),
            (true, Some(category)) => format!("{}: {}", self.environment, category),
            (true, None) => format!("{}: unclassified", self.environment),
        }
    }
}

/// Load the configuration from `path`, or fall back to the defaults.
pub fn load(path: Option<&Path>) -> CommandResult<(RegistryConfig, EnvironmentRegistry)> {
    let config = match path {
        Some(path) => RegistryConfig::from_file(path)?,
        None => RegistryConfig::default(),
    };
    let registry = config.build_registry()?;
    info!(environments = registry.len(), "registry loaded");
    Ok((config, registry))
}

pub fn check(registry: &EnvironmentRegistry, env: &str) -> EnvironmentReport {
    EnvironmentReport::new(registry, Environment::new(env))
}

pub fn list(registry: &EnvironmentRegistry) -> Vec<EnvironmentReport> {
    registry
        .environments()
        .into_iter()
        .map(|env| EnvironmentReport::new(registry, env.clone()))
        .collect()
}

/// Resolve the current environment from `var` and describe it.
pub fn resolve_current(
    current: &CurrentEnvironment,
    registry: &EnvironmentRegistry,
    reader: &impl ReadEnv,
    var: &str,
) -> CommandResult<EnvironmentReport> {
    let env = current.read_from_var(registry, reader, var)?;
    Ok(EnvironmentReport::new(registry, env.clone()))
}

pub fn format(env: &str, case: Case, locale: Locale) -> String {
    let env = Environment::new(env);
    match case {
        Case::Upper => env.upper_with(locale),
        Case::Lower => env.lower_with(locale),
        Case::Title => env.title_with(locale),
    }
}

pub fn render_report(report: &EnvironmentReport, json: bool) -> CommandResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.to_text())
    }
}

pub fn render_list(reports: &[EnvironmentReport], json: bool) -> CommandResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(reports)?);
    }
    let lines: Vec<String> = reports
        .iter()
        .map(|report| {
            let category = report.category.map_or("-", |c| c.as_str());
            format!("{:<24}{}", report.environment, category)
        })
        .collect();
    Ok(lines.join("\n"))
}
