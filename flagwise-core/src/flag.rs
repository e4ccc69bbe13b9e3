//! Flag Definitions
//!
//! Defines the immutable catalogue entries that resolution works on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Command a flag applies to.
///
/// Serialized as a plain string: `"all"` or the command name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommandScope {
    /// Applies to every command
    #[default]
    All,
    /// Applies only to the named command
    Only(String),
}

impl CommandScope {
    pub fn only(command: impl Into<String>) -> Self {
        Self::from(command.into())
    }

    /// Check whether the scope covers the executing command
    pub fn applies_to(&self, command: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(scoped) => scoped == command,
        }
    }
}

impl From<String> for CommandScope {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for CommandScope {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CommandScope> for String {
    fn from(scope: CommandScope) -> Self {
        match scope {
            CommandScope::All => "all".to_string(),
            CommandScope::Only(command) => command,
        }
    }
}

impl fmt::Display for CommandScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(command) => f.write_str(command),
        }
    }
}

/// Gradual rollout configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradualRollout {
    /// Percentage of sites (0-100)
    pub percentage: u8,
}

impl GradualRollout {
    pub fn new(percentage: u8) -> Self {
        Self {
            percentage: percentage.min(100),
        }
    }

    /// Percentage handed to the rollout oracle.
    ///
    /// Deserialized definitions are not clamped, so clamp here.
    pub fn effective_percentage(&self) -> u8 {
        self.percentage.min(100)
    }
}

/// A catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Unique flag name
    pub name: String,

    /// Human readable description
    #[serde(default)]
    pub description: String,

    /// Command the flag applies to
    #[serde(default)]
    pub command: CommandScope,

    /// Dependency name -> version range that must be installed
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub compatibility: IndexMap<String, String>,

    /// Suppress the flag in CI environments
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_ci: bool,

    /// Probabilistic opt-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradual_rollout: Option<GradualRollout>,

    /// Flags enabled together with this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_flags: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub experimental: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umbrella_issue_url: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FlagDefinition {
    /// Create a flag that applies to every command
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise_core::FlagDefinition;
    ///
    /// let flag = FlagDefinition::new("FAST_DEV", "Faster development server")
    ///     .for_command("develop")
    ///     .including("LAZY_IMAGES");
    /// assert_eq!(flag.included_flags, vec!["LAZY_IMAGES".to_string()]);
    /// ```
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            command: CommandScope::All,
            compatibility: IndexMap::new(),
            no_ci: false,
            gradual_rollout: None,
            included_flags: Vec::new(),
            experimental: false,
            umbrella_issue_url: None,
        }
    }

    /// Restrict the flag to a single command
    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = CommandScope::only(command);
        self
    }

    /// Require an installed dependency version
    pub fn with_compatibility(
        mut self,
        dependency: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.compatibility.insert(dependency.into(), range.into());
        self
    }

    /// Suppress the flag in CI
    pub fn no_ci(mut self) -> Self {
        self.no_ci = true;
        self
    }

    /// Set rollout percentage
    pub fn with_rollout(mut self, percentage: u8) -> Self {
        self.gradual_rollout = Some(GradualRollout::new(percentage));
        self
    }

    /// Add an included flag
    pub fn including(mut self, name: impl Into<String>) -> Self {
        self.included_flags.push(name.into());
        self
    }

    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }

    pub fn with_umbrella_issue(mut self, url: impl Into<String>) -> Self {
        self.umbrella_issue_url = Some(url.into());
        self
    }
}
