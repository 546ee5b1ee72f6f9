use crate::environment::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("env '{environment}' cannot be '{requested}' since already defined as '{existing}'")]
    CategoryConflict {
        environment: String,
        requested: Category,
        existing: Category,
    },

    #[error("Invalid environment '{environment}': {reason}")]
    InvalidEnvironment { environment: String, reason: String },

    #[error("Current environment already set to '{current}', resetting to '{attempted}' not allowed")]
    AlreadySet { current: String, attempted: String },

    #[error("Missing environment variable: {name}")]
    MissingVariable { name: String },

    #[error("Environment variable {name} is not valid unicode")]
    NonUnicodeVariable { name: String },

    #[error("Current environment has not been set")]
    NotInitialized,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EnvResult<T> = Result<T, EnvError>;
