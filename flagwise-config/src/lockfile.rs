// Installed dependency versions from Cargo.lock

use crate::{ConfigError, Result};
use flagwise_core::{InstalledVersions, Version};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Lockfile {
    #[serde(default)]
    package: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
}

/// Parse `Cargo.lock` content.
///
/// A package locked at several versions resolves to the highest one.
pub fn parse_lockfile(content: &str) -> Result<InstalledVersions> {
    let lockfile: Lockfile = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("Lockfile parse error: {}", e)))?;

    let mut versions = InstalledVersions::new();
    for package in lockfile.package {
        let version: Version = package.version.parse().map_err(|e| {
            ConfigError::ParseError(format!(
                "Invalid version {} for {}: {}",
                package.version, package.name, e
            ))
        })?;

        if versions.get(&package.name).is_none_or(|current| *current < version) {
            versions.insert(package.name, version);
        }
    }

    tracing::debug!(packages = versions.len(), "Parsed lockfile");
    Ok(versions)
}

/// Load installed versions from a `Cargo.lock` file
pub fn load_lockfile(path: impl AsRef<Path>) -> Result<InstalledVersions> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_lockfile(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKFILE: &str = r#"
# This file is automatically @generated by Cargo.
version = 4

[[package]]
name = "serde"
version = "1.0.190"
source = "registry+https://github.com/rust-lang/crates.io-index"

[[package]]
name = "syn"
version = "1.0.109"

[[package]]
name = "syn"
version = "2.0.48"
dependencies = ["proc-macro2"]
"#;

    #[test]
    fn test_parse_lockfile() {
        let versions = parse_lockfile(LOCKFILE).unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions.get("serde"), Some(&Version::new(1, 0, 190)));
        assert_eq!(versions.get("syn"), Some(&Version::new(2, 0, 48)));
    }

    #[test]
    fn test_empty_lockfile() {
        assert!(parse_lockfile("version = 4").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_version() {
        let err = parse_lockfile("[[package]]\nname = \"x\"\nversion = \"one\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_lockfile() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Cargo.lock");

        let err = load_lockfile(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(ref msg) if msg.contains("Cargo.lock")));
        assert!(err.to_string().starts_with("Failed to load configuration"));
    }
}
