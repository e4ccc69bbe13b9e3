//! Resolution inputs supplied by the host

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where resolution is happening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Command being executed (`build`, `develop`, ...)
    pub executing_command: String,
    /// Whether the process runs in a CI environment
    pub is_ci: bool,
}

impl ExecutionContext {
    pub fn new(executing_command: impl Into<String>) -> Self {
        Self {
            executing_command: executing_command.into(),
            is_ci: false,
        }
    }

    pub fn with_ci(mut self, is_ci: bool) -> Self {
        self.is_ci = is_ci;
        self
    }
}

/// Flag settings declared by the user, in declaration order.
///
/// A missing key means "no opinion", which is not the same as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserFlagConfig {
    flags: IndexMap<String, bool>,
}

impl UserFlagConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, enabled);
        self
    }

    /// Set a flag, keeping its original position if already declared
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.flags.insert(name.into(), enabled);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Explicitly set to `true`
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name) == Some(true)
    }

    /// Explicitly set to `false`
    pub fn is_disabled(&self, name: &str) -> bool {
        self.get(name) == Some(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }

    /// Apply another config on top of this one
    pub fn merge(&mut self, overrides: &UserFlagConfig) {
        for (name, enabled) in overrides.iter() {
            self.set(name, enabled);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for UserFlagConfig {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut config = Self::new();
        config.extend(iter);
        config
    }
}

impl<K: Into<String>> Extend<(K, bool)> for UserFlagConfig {
    fn extend<I: IntoIterator<Item = (K, bool)>>(&mut self, iter: I) {
        for (name, enabled) in iter {
            self.set(name, enabled);
        }
    }
}
