//! Integration tests for flagwise-config

use flagwise_config::*;
use flagwise_core::{ExecutionContext, FlagResolver, Version};
use std::fs;
use tempfile::TempDir;

const CATALOGUE: &str = r#"
[[flag]]
name = "FAST_DEV"
description = "Speed up the development server"
command = "develop"
included_flags = ["LAZY_IMAGES"]

[[flag]]
name = "LAZY_IMAGES"
description = "Process images on demand"

[[flag]]
name = "PARALLEL_BUILD"
description = "Build pages in parallel"
command = "build"

[flag.compatibility]
rayon = "^1.8"
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_catalogue_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "flags.toml", CATALOGUE);

    let catalogue = load_catalogue(&path).unwrap();
    let names: Vec<_> = catalogue.iter().map(|flag| flag.name.as_str()).collect();

    assert_eq!(names, vec!["FAST_DEV", "LAZY_IMAGES", "PARALLEL_BUILD"]);
    assert!(catalogue.validate().is_empty());
}

#[test]
fn test_load_user_flags_json() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "flagwise.json",
        r#"{"flags": {"FAST_DEV": true, "LAZY_IMAGES": false}}"#,
    );

    let config = load_user_flags(&path).unwrap();
    assert!(config.is_enabled("FAST_DEV"));
    assert!(config.is_disabled("LAZY_IMAGES"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_user_flags(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "flags.yaml", "flags: []");
    assert!(load_catalogue(&path).is_err());
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "flagwise.toml", "[flags]\nFAST_DEV = true\nLAZY_IMAGES = true\n");

    let mut config = load_user_flags(&path).unwrap();
    let overrides = EnvLoader::default()
        .parse_pairs([("FLAGWISE_FLAG_FAST_DEV", "false")])
        .unwrap();
    config.merge(&overrides);

    assert!(config.is_disabled("FAST_DEV"));
    assert!(config.is_enabled("LAZY_IMAGES"));
    let names: Vec<_> = config.keys().collect();
    assert_eq!(names, vec!["FAST_DEV", "LAZY_IMAGES"]);
}

#[test]
fn test_lockfile_drives_compatibility() {
    let dir = TempDir::new().unwrap();
    let catalogue = load_catalogue(write(&dir, "flags.toml", CATALOGUE)).unwrap();
    let config = load_user_flags(write(&dir, "flagwise.toml", "PARALLEL_BUILD = true\n")).unwrap();

    let old = write(&dir, "old.lock", "[[package]]\nname = \"rayon\"\nversion = \"1.5.3\"\n");
    let new = write(&dir, "new.lock", "[[package]]\nname = \"rayon\"\nversion = \"1.10.0\"\n");

    let resolver = FlagResolver::new(catalogue);
    let context = ExecutionContext::new("build");

    let versions = load_lockfile(&old).unwrap();
    assert_eq!(versions.get("rayon"), Some(&Version::new(1, 5, 3)));
    let outdated = resolver.clone().with_versions(versions);
    assert!(!outdated.resolve(&config, &context).is_enabled("PARALLEL_BUILD"));

    let current = resolver.with_versions(load_lockfile(&new).unwrap());
    assert!(current.resolve(&config, &context).is_enabled("PARALLEL_BUILD"));
}

#[test]
fn test_probe_context_feeds_resolution() {
    let dir = TempDir::new().unwrap();
    let catalogue = load_catalogue(write(&dir, "flags.toml", CATALOGUE)).unwrap();
    let config = load_user_flags(write(&dir, "flagwise.toml", "FAST_DEV = true\n")).unwrap();

    let probe = EnvProbe::new(|key: &str| (key == "CI").then(|| "true".to_string()));
    let context = probe.context("develop");

    let resolver = FlagResolver::new(catalogue);
    let result = resolver.resolve(&config, &context);
    assert_eq!(result.enabled_names(), vec!["FAST_DEV", "LAZY_IMAGES"]);
}
