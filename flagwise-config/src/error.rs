// Error types for configuration loading

use flagwise_core::FlagError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid flag value for {name}: expected a boolean, found {found}")]
    InvalidFlagValue { name: String, found: String },

    #[error("Invalid catalogue: {0}")]
    Catalogue(#[from] FlagError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
