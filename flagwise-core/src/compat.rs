//! Compatibility checks
//!
//! A flag may require installed dependencies within a version range. Any
//! dependency that cannot be resolved makes the flag unusable.

use crate::error::{FlagError, FlagResult};
use crate::flag::FlagDefinition;
use semver::{Comparator, Op, Version, VersionReq};
use std::collections::HashMap;
use tracing::debug;

/// Looks up installed dependency versions.
pub trait VersionResolver: Send + Sync {
    /// Installed version of `dependency`, or an error if it cannot be resolved
    fn installed_version(&self, dependency: &str) -> FlagResult<Version>;
}

impl<F> VersionResolver for F
where
    F: Fn(&str) -> Option<Version> + Send + Sync,
{
    fn installed_version(&self, dependency: &str) -> FlagResult<Version> {
        self(dependency).ok_or_else(|| FlagError::dependency_not_found(dependency))
    }
}

/// In-memory table of installed versions
#[derive(Debug, Clone, Default)]
pub struct InstalledVersions {
    versions: HashMap<String, Version>,
}

impl InstalledVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, dependency: impl Into<String>, version: Version) -> Self {
        self.insert(dependency, version);
        self
    }

    pub fn insert(&mut self, dependency: impl Into<String>, version: Version) {
        self.versions.insert(dependency.into(), version);
    }

    /// Parse and insert a version string
    pub fn insert_str(&mut self, dependency: impl Into<String>, version: &str) -> FlagResult<()> {
        let dependency = dependency.into();
        let parsed = Version::parse(version).map_err(|source| FlagError::InvalidVersion {
            dependency: dependency.clone(),
            version: version.to_string(),
            source,
        })?;
        self.versions.insert(dependency, parsed);
        Ok(())
    }

    pub fn get(&self, dependency: &str) -> Option<&Version> {
        self.versions.get(dependency)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl VersionResolver for InstalledVersions {
    fn installed_version(&self, dependency: &str) -> FlagResult<Version> {
        self.versions
            .get(dependency)
            .cloned()
            .ok_or_else(|| FlagError::dependency_not_found(dependency))
    }
}

/// Check every compatibility constraint of a flag, returning the first failure.
pub fn check_compatibility(flag: &FlagDefinition, versions: &dyn VersionResolver) -> FlagResult<()> {
    for (dependency, range) in &flag.compatibility {
        let req = VersionReq::parse(range).map_err(|source| FlagError::InvalidVersionReq {
            dependency: dependency.clone(),
            range: range.clone(),
            source,
        })?;

        let installed = versions.installed_version(dependency)?;

        if !satisfies(&req, &installed) {
            return Err(FlagError::Incompatible {
                dependency: dependency.clone(),
                installed,
                range: range.clone(),
            });
        }
    }

    Ok(())
}

/// Whether the flag can be used with the installed dependencies
pub fn is_usable(flag: &FlagDefinition, versions: &dyn VersionResolver) -> bool {
    match check_compatibility(flag, versions) {
        Ok(()) => true,
        Err(err) => {
            debug!(flag = %flag.name, error = %err, "Flag is not usable");
            false
        }
    }
}

// A pre-release matches when its release part is in range and it does not
// fall below any comparator's lower bound.
fn satisfies(req: &VersionReq, version: &Version) -> bool {
    if req.matches(version) {
        return true;
    }
    if version.pre.is_empty() {
        return false;
    }

    let release = Version::new(version.major, version.minor, version.patch);
    req.matches(&release) && req.comparators.iter().all(|c| above_lower_bound(c, version))
}

fn above_lower_bound(comparator: &Comparator, version: &Version) -> bool {
    let minor = comparator.minor.unwrap_or(0);
    let patch = comparator.patch.unwrap_or(0);
    let mut bound = Version::new(comparator.major, minor, patch);
    bound.pre = comparator.pre.clone();

    match comparator.op {
        Op::Less | Op::LessEq => true,
        Op::Greater => match (comparator.minor, comparator.patch) {
            (Some(_), Some(_)) => *version > bound,
            (Some(minor), None) => *version >= Version::new(comparator.major, minor + 1, 0),
            (None, _) => *version >= Version::new(comparator.major + 1, 0, 0),
        },
        Op::Exact | Op::GreaterEq | Op::Tilde | Op::Caret | Op::Wildcard => *version >= bound,
        _ => false,
    }
}
