//! Error types for the Flagwise CLI.

use flagwise_config::ConfigError;
use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// Catalogue, settings or lockfile could not be loaded
    Config(ConfigError),

    /// Output serialization error
    Output(String),

    /// Invalid argument
    InvalidArgument(String),

    /// Catalogue check found issues
    Validation(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_passes_through() {
        let err = CliError::from(ConfigError::LoadError("Failed to read flags.toml".into()));

        assert_eq!(err.to_string(), "Failed to load configuration: Failed to read flags.toml");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_validation_has_no_source() {
        let err = CliError::Validation("2 issue(s) found".into());

        assert_eq!(err.to_string(), "Validation error: 2 issue(s) found");
        assert!(err.source().is_none());
    }
}
