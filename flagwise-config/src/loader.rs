// Configuration and catalogue file loaders

use crate::{ConfigError, Result};
use flagwise_core::{Catalogue, FlagDefinition, UserFlagConfig};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError(format!("No file extension found: {}", path.display())))?;

        Self::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))
    }
}

/// Configuration file loader
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        FileFormat::from_path(path.as_ref()).map(Self::new)
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load a file as a generic value
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), format = ?self.format, "Loaded file");
        self.parse(&content)
    }

    /// Parse configuration from string
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => self.parse_json(content),
            FileFormat::Toml => self.parse_toml(content),
        }
    }

    /// Parse user flag settings from string
    pub fn parse_user_flags(&self, content: &str) -> Result<UserFlagConfig> {
        user_flags_from_value(self.parse(content)?)
    }

    /// Parse a catalogue from string
    pub fn parse_catalogue(&self, content: &str) -> Result<Catalogue> {
        catalogue_from_value(self.parse(content)?)
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
    }
}

/// Load user flag settings, detecting the format from the extension.
pub fn load_user_flags(path: impl AsRef<Path>) -> Result<UserFlagConfig> {
    let path = path.as_ref();
    let loader = ConfigLoader::auto(path)?;
    user_flags_from_value(loader.load_file(path)?)
}

/// Load a flag catalogue, detecting the format from the extension.
pub fn load_catalogue(path: impl AsRef<Path>) -> Result<Catalogue> {
    let path = path.as_ref();
    let loader = ConfigLoader::auto(path)?;
    catalogue_from_value(loader.load_file(path)?)
}

/// Read user settings from either a `flags` table or a bare map of booleans.
pub fn user_flags_from_value(value: Value) -> Result<UserFlagConfig> {
    let Value::Object(mut root) = value else {
        return Err(ConfigError::ParseError(
            "flag settings must be a table of booleans".to_string(),
        ));
    };

    // A boolean "flags" entry is a flag with that name, not the settings table
    let table = match root.get("flags") {
        Some(Value::Object(_)) => match root.remove("flags") {
            Some(Value::Object(flags)) => flags,
            _ => Map::new(),
        },
        _ => root,
    };

    let mut config = UserFlagConfig::new();
    for (name, value) in table {
        match value {
            Value::Bool(enabled) => config.set(name, enabled),
            other => {
                return Err(ConfigError::InvalidFlagValue {
                    name,
                    found: other.to_string(),
                });
            }
        }
    }

    Ok(config)
}

/// Read a catalogue from a `flags` array, `[[flag]]` tables or a top-level array.
pub fn catalogue_from_value(value: Value) -> Result<Catalogue> {
    let entries = match value {
        Value::Array(entries) => Value::Array(entries),
        Value::Object(mut root) => root
            .remove("flags")
            .or_else(|| root.remove("flag"))
            .ok_or_else(|| {
                ConfigError::ParseError("catalogue must contain a `flags` array".to_string())
            })?,
        _ => {
            return Err(ConfigError::ParseError(
                "catalogue must be an array of flag definitions".to_string(),
            ));
        }
    };

    let definitions: Vec<FlagDefinition> = serde_json::from_value(entries)
        .map_err(|e| ConfigError::ParseError(format!("Invalid flag definition: {}", e)))?;

    tracing::debug!(flags = definitions.len(), "Parsed catalogue");
    Ok(Catalogue::new(definitions)?)
}
