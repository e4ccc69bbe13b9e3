//! End-to-end tests for the `flagwise` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
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
experimental = true

[[flag]]
name = "PARALLEL_BUILD"
description = "Build pages in parallel"
command = "build"
no_ci = true
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn flagwise() -> Command {
    let mut cmd = Command::cargo_bin("flagwise").unwrap();
    cmd.arg("--no-color")
        .env_remove("FLAGWISE_CATALOGUE")
        .env_remove("FLAGWISE_SITE_ID");
    cmd
}

#[test]
fn test_resolve_prints_message() {
    let fixture = Fixture::new();
    let catalogue = fixture.write("flags.toml", CATALOGUE);
    let config = fixture.write("flagwise.toml", "[flags]\nFAST_DEV = true\n");

    flagwise()
        .args(["resolve", "--command", "develop", "--no-ci", "--catalogue"])
        .arg(&catalogue)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("The following flags are active:"))
        .stdout(predicate::str::contains("- FAST_DEV · Speed up the development server"))
        .stdout(predicate::str::contains("- LAZY_IMAGES · EXPERIMENTAL · Process images on demand"))
        .stdout(predicate::str::contains(
            "There is one other flag available that you might be interested in:",
        ));
}

#[test]
fn test_resolve_reports_unknown_flags() {
    let fixture = Fixture::new();
    let catalogue = fixture.write("flags.toml", CATALOGUE);
    let config = fixture.write("flagwise.json", r#"{"FAST_DEVV": true}"#);

    flagwise()
        .args(["resolve", "--command", "develop", "--no-ci", "--catalogue"])
        .arg(&catalogue)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("- FAST_DEVV (did you mean: FAST_DEV)"));
}

#[test]
fn test_resolve_ci_suppression() {
    let fixture = Fixture::new();
    let catalogue = fixture.write("flags.toml", CATALOGUE);
    let config = fixture.write("flagwise.toml", "PARALLEL_BUILD = true\n");

    flagwise()
        .args(["resolve", "--ci", "--json", "--catalogue"])
        .arg(&catalogue)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled_flags\": []"));

    flagwise()
        .args(["resolve", "--no-ci", "--json", "--catalogue"])
        .arg(&catalogue)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"PARALLEL_BUILD\""))
        .stdout(predicate::str::contains("\"enablement\": \"explicit\""));
}

#[test]
fn test_resolve_env_override() {
    let fixture = Fixture::new();
    let catalogue = fixture.write("flags.toml", CATALOGUE);

    flagwise()
        .env("FLAGWISE_FLAG_LAZY_IMAGES", "true")
        .args(["resolve", "--command", "develop", "--no-ci", "--catalogue"])
        .arg(&catalogue)
        .assert()
        .success()
        .stdout(predicate::str::contains("- LAZY_IMAGES"));
}

#[test]
fn test_resolve_missing_catalogue() {
    let fixture = Fixture::new();

    flagwise()
        .args(["resolve", "--catalogue"])
        .arg(fixture.dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_list() {
    let fixture = Fixture::new();
    let catalogue = fixture.write("flags.toml", CATALOGUE);

    flagwise()
        .args(["list", "--catalogue"])
        .arg(&catalogue)
        .assert()
        .success()
        .stdout(predicate::str::contains("FAST_DEV"))
        .stdout(predicate::str::contains("includes: LAZY_IMAGES"))
        .stdout(predicate::str::contains("not in CI"));
}

#[test]
fn test_check_clean_catalogue() {
    let fixture = Fixture::new();
    let catalogue = fixture.write("flags.toml", CATALOGUE);

    flagwise()
        .args(["check", "--catalogue"])
        .arg(&catalogue)
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn test_check_reports_issues() {
    let fixture = Fixture::new();
    let catalogue = fixture.write(
        "flags.json",
        r#"[
            {"name": "A", "description": "First", "included_flags": ["MISSING", "A"]},
            {"name": "B", "description": "Second", "compatibility": {"tokio": "not a range"}}
        ]"#,
    );

    flagwise()
        .args(["check", "--catalogue"])
        .arg(&catalogue)
        .assert()
        .failure()
        .stdout(predicate::str::contains("A includes unknown flag MISSING"))
        .stdout(predicate::str::contains("A includes itself"))
        .stdout(predicate::str::contains("invalid range 'not a range' for tokio"))
        .stderr(predicate::str::contains("3 issue(s) found"));
}
