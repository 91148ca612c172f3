//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A `${VAR}` placeholder names a variable absent from the environment.
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Placeholder pattern failed to compile: {0}")]
    Placeholder(#[from] regex::Error),

    /// Rejected by [`crate::ConfigValidator`].
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
