// Execution context detection

use flagwise_core::ExecutionContext;
use std::env;

/// Variables set by common CI providers
pub const CI_VARIABLES: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "BUILD_NUMBER",
    "RUN_ID",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "CIRCLECI",
    "TF_BUILD",
    "JENKINS_URL",
];

fn read_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Builds an [`ExecutionContext`] from environment variables.
pub struct EnvProbe<F = fn(&str) -> Option<String>> {
    lookup: F,
}

impl EnvProbe {
    /// Probe the process environment
    pub fn from_env() -> Self {
        Self { lookup: read_var }
    }
}

impl Default for EnvProbe {
    fn default() -> Self {
        Self::from_env()
    }
}

impl<F> EnvProbe<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Probe an arbitrary variable lookup
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Whether the process runs under a CI provider.
    ///
    /// `CI=false` or `CI=0` opts out even if other variables are present.
    pub fn is_ci(&self) -> bool {
        if let Some(ci) = (self.lookup)("CI") {
            let ci = ci.trim();
            if ci == "0" || ci.eq_ignore_ascii_case("false") {
                return false;
            }
        }

        CI_VARIABLES
            .iter()
            .any(|key| (self.lookup)(key).is_some_and(|value| !value.is_empty()))
    }

    /// Context for running `command` in this environment
    pub fn context(&self, command: impl Into<String>) -> ExecutionContext {
        let is_ci = self.is_ci();
        let context = ExecutionContext::new(command).with_ci(is_ci);
        tracing::debug!(command = %context.executing_command, is_ci, "Detected execution context");
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn probe(vars: &[(&str, &str)]) -> EnvProbe<impl Fn(&str) -> Option<String>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvProbe::new(move |key: &str| vars.get(key).cloned())
    }

    #[test]
    fn test_no_ci() {
        assert!(!probe(&[("PATH", "/usr/bin")]).is_ci());
    }

    #[test]
    fn test_ci_variables() {
        assert!(probe(&[("CI", "true")]).is_ci());
        assert!(probe(&[("GITHUB_ACTIONS", "true")]).is_ci());
        assert!(probe(&[("JENKINS_URL", "https://ci.example.com")]).is_ci());
        assert!(probe(&[("BUILD_NUMBER", "42")]).is_ci());
    }

    #[test]
    fn test_ci_opt_out() {
        assert!(!probe(&[("CI", "false")]).is_ci());
        assert!(!probe(&[("CI", "0"), ("BUILDKITE", "true")]).is_ci());
    }

    #[test]
    fn test_empty_value_ignored() {
        assert!(!probe(&[("CIRCLECI", "")]).is_ci());
    }

    #[test]
    fn test_context() {
        let context = probe(&[("GITLAB_CI", "true")]).context("build");
        assert_eq!(context.executing_command, "build");
        assert!(context.is_ci);
    }
}
