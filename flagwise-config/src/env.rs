// Environment variable flag overrides

use crate::{ConfigError, Result};
use flagwise_core::UserFlagConfig;
use std::env;
use std::path::Path;

/// Default prefix for flag override variables
pub const FLAG_PREFIX: &str = "FLAGWISE_FLAG_";

/// Reads `FLAGWISE_FLAG_<NAME>=true|false` overrides.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Load overrides from the process environment
    pub fn load(&self) -> Result<UserFlagConfig> {
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(key, _)| key.starts_with(&self.prefix))
            .collect();
        // Process env order is unspecified
        vars.sort();
        self.parse_pairs(vars)
    }

    /// Load overrides from explicit key/value pairs, keeping their order
    pub fn parse_pairs<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<UserFlagConfig>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = UserFlagConfig::new();

        for (key, value) in pairs {
            let Some(name) = key.as_ref().strip_prefix(&self.prefix) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let enabled = parse_bool(value.as_ref()).ok_or_else(|| ConfigError::InvalidFlagValue {
                name: name.to_string(),
                found: value.as_ref().to_string(),
            })?;
            config.set(name, enabled);
        }

        Ok(config)
    }

    /// Apply environment overrides on top of file configuration
    pub fn apply(&self, config: &mut UserFlagConfig) -> Result<()> {
        let overrides = self.load()?;
        if !overrides.is_empty() {
            tracing::debug!(count = overrides.len(), "Applying flag overrides from environment");
        }
        config.merge(&overrides);
        Ok(())
    }

    /// Load a `.env` file into the process environment.
    ///
    /// Without a path, a missing `.env` in the working directory is ignored.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        Ok(())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(FLAG_PREFIX)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
