//! Error types for flag resolution

use thiserror::Error;

/// Result type for flag operations
pub type FlagResult<T> = Result<T, FlagError>;

/// Errors raised while building a catalogue or checking a flag's compatibility.
///
/// Resolution itself never fails: compatibility errors are logged and the
/// affected flag is treated as unusable.
#[derive(Debug, Error)]
pub enum FlagError {
    /// Dependency could not be resolved to an installed version
    #[error("Dependency not installed: {0}")]
    DependencyNotFound(String),

    /// Installed version does not satisfy the declared range
    #[error("{dependency} {installed} does not satisfy {range}")]
    Incompatible {
        dependency: String,
        installed: semver::Version,
        range: String,
    },

    /// Version range in a flag definition could not be parsed
    #[error("Invalid version range '{range}' for {dependency}: {source}")]
    InvalidVersionReq {
        dependency: String,
        range: String,
        #[source]
        source: semver::Error,
    },

    /// Installed version string could not be parsed
    #[error("Invalid version '{version}' for {dependency}: {source}")]
    InvalidVersion {
        dependency: String,
        version: String,
        #[source]
        source: semver::Error,
    },

    /// Two catalogue entries share a name
    #[error("Duplicate flag in catalogue: {0}")]
    DuplicateFlag(String),
}

impl FlagError {
    /// Create a dependency-not-found error
    pub fn dependency_not_found<S: Into<String>>(dependency: S) -> Self {
        Self::DependencyNotFound(dependency.into())
    }

    /// Check if this error means the dependency is missing
    pub fn is_dependency_not_found(&self) -> bool {
        matches!(self, Self::DependencyNotFound(_))
    }
}
