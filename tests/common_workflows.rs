//! Integration tests for common Flagwise workflows.
//!
//! These tests go through the facade crate the way a host tool would.

use flagwise::prelude::*;

fn catalogue() -> Catalogue {
    Catalogue::new(vec![
        FlagDefinition::new("FAST_DEV", "Speed up the development server")
            .for_command("develop")
            .including("LAZY_IMAGES"),
        FlagDefinition::new("LAZY_IMAGES", "Process images on demand").experimental(),
        FlagDefinition::new("PARALLEL_BUILD", "Build pages in parallel")
            .for_command("build")
            .no_ci(),
        FlagDefinition::new("NEW_CACHE", "Rewritten cache")
            .with_rollout(100)
            .with_umbrella_issue("https://example.com/issues/7"),
    ])
    .unwrap()
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_develop_run() {
    let resolver = FlagResolver::new(catalogue());
    let config = UserFlagConfig::new().with("FAST_DEV", true);

    let result = resolver.resolve(&config, &ExecutionContext::new("develop"));

    assert_eq!(result.enabled_names(), vec!["FAST_DEV", "LAZY_IMAGES"]);
    assert_eq!(result.enabled_flags[1].enablement, Enablement::Included);
    assert!(result.unknown_flags.is_empty());
    assert_eq!(
        result.message,
        "The following flags are active:\
         \n- FAST_DEV · Speed up the development server\
         \n- LAZY_IMAGES · EXPERIMENTAL · Process images on demand\
         \n\nThere are 2 other flags available that you might be interested in:\
         \n- PARALLEL_BUILD · Build pages in parallel\
         \n- NEW_CACHE · (Umbrella Issue (https://example.com/issues/7)) · Rewritten cache\n"
    );
}

#[test]
fn test_ci_build_with_rollout() {
    let resolver = FlagResolver::new(catalogue()).with_oracle(SiteSampler::new("site-1"));
    let config = UserFlagConfig::new().with("PARALLEL_BUILD", true);

    let result = resolver.resolve(&config, &ExecutionContext::new("build").with_ci(true));

    // 100% rollout always samples in
    assert_eq!(result.enabled_names(), vec!["NEW_CACHE"]);
    assert_eq!(result.opted_in().count(), 1);
    assert!(!result.message.contains("The following flags are active:"));
    assert!(
        result
            .message
            .contains("The following flags were automatically enabled on your site:")
    );
}

#[test]
fn test_nothing_enabled() {
    let resolver = FlagResolver::new(catalogue());
    let config = UserFlagConfig::new().with("NEW_CACHE", false).with("FAST_DEVE", true);

    let result = resolver.resolve(&config, &ExecutionContext::new("develop"));

    assert!(result.enabled_flags.is_empty());
    assert_eq!(result.message, "");
    assert_eq!(
        result.unknown_flag_message,
        "The following flag(s) found in your configuration are not known:\
         \n- FAST_DEVE (did you mean: FAST_DEV)"
    );
}

#[test]
fn test_version_gating() {
    let catalogue = Catalogue::new(vec![
        FlagDefinition::new("NEW_RUNTIME", "Next-gen runtime").with_compatibility("tokio", ">=1.30, <2"),
    ])
    .unwrap();
    let config = UserFlagConfig::new().with("NEW_RUNTIME", true);
    let context = ExecutionContext::new("build");

    let versions = |name: &str| (name == "tokio").then(|| Version::new(1, 35, 0));
    let resolver = FlagResolver::new(catalogue).with_versions(versions);

    assert!(resolver.resolve(&config, &context).is_enabled("NEW_RUNTIME"));
}

// =============================================================================
// File-based setup
// =============================================================================

#[cfg(feature = "config")]
#[test]
fn test_configured_from_files() {
    use std::fs;

    let dir = tempfile::TempDir::new().unwrap();
    let catalogue_path = dir.path().join("flags.json");
    let config_path = dir.path().join("flagwise.toml");
    fs::write(
        &catalogue_path,
        r#"{"flags": [
            {"name": "FAST_DEV", "description": "Faster develop", "command": "develop"},
            {"name": "NEW_RUNTIME", "description": "Next-gen runtime", "compatibility": {"tokio": "^1"}}
        ]}"#,
    )
    .unwrap();
    fs::write(&config_path, "[flags]\nFAST_DEV = true\nNEW_RUNTIME = true\n").unwrap();

    let resolver = FlagResolver::new(load_catalogue(&catalogue_path).unwrap());
    let config = load_user_flags(&config_path).unwrap();
    let context = EnvProbe::new(|_: &str| None).context("develop");

    let result = resolver.resolve(&config, &context);

    // tokio is not installed, so NEW_RUNTIME is treated as unknown
    assert_eq!(result.enabled_names(), vec!["FAST_DEV"]);
    assert_eq!(result.unknown_flags.len(), 1);
    assert_eq!(result.unknown_flags[0].name, "NEW_RUNTIME");
}
