//! Flag catalogue
//!
//! The closed set of flag definitions known to the host, indexed by name.

use crate::error::{FlagError, FlagResult};
use crate::flag::FlagDefinition;
use semver::VersionReq;
use std::collections::HashMap;
use std::fmt;

/// Ordered, name-indexed collection of flag definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    flags: Vec<FlagDefinition>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Build a catalogue, rejecting duplicate names.
    pub fn new(flags: impl IntoIterator<Item = FlagDefinition>) -> FlagResult<Self> {
        let flags: Vec<FlagDefinition> = flags.into_iter().collect();
        let mut index = HashMap::with_capacity(flags.len());

        for (position, flag) in flags.iter().enumerate() {
            if index.insert(flag.name.clone(), position).is_some() {
                return Err(FlagError::DuplicateFlag(flag.name.clone()));
            }
        }

        Ok(Self { flags, index })
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Flags in catalogue order
    pub fn iter(&self) -> std::slice::Iter<'_, FlagDefinition> {
        self.flags.iter()
    }

    pub fn as_slice(&self) -> &[FlagDefinition] {
        &self.flags
    }

    /// Look up a flag by name
    pub fn get(&self, name: &str) -> Option<&FlagDefinition> {
        self.index_of(name).map(|position| &self.flags[position])
    }

    /// Position of a flag in catalogue order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Check the catalogue for entries that resolution would silently skip.
    pub fn validate(&self) -> Vec<CatalogueIssue> {
        let mut issues = Vec::new();

        for flag in &self.flags {
            for included in &flag.included_flags {
                if *included == flag.name {
                    issues.push(CatalogueIssue::SelfInclude {
                        flag: flag.name.clone(),
                    });
                } else if !self.contains(included) {
                    issues.push(CatalogueIssue::UnknownInclude {
                        flag: flag.name.clone(),
                        included: included.clone(),
                    });
                }
            }

            for (dependency, range) in &flag.compatibility {
                if let Err(err) = VersionReq::parse(range) {
                    issues.push(CatalogueIssue::InvalidRange {
                        flag: flag.name.clone(),
                        dependency: dependency.clone(),
                        range: range.clone(),
                        reason: err.to_string(),
                    });
                }
            }

            if let Some(rollout) = flag.gradual_rollout
                && rollout.percentage > 100
            {
                issues.push(CatalogueIssue::PercentageOutOfRange {
                    flag: flag.name.clone(),
                    percentage: rollout.percentage,
                });
            }
        }

        issues
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a FlagDefinition;
    type IntoIter = std::slice::Iter<'a, FlagDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

/// A catalogue entry that resolution tolerates but that is probably a mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueIssue {
    /// `included_flags` names a flag that does not exist
    UnknownInclude { flag: String, included: String },

    /// A flag includes itself
    SelfInclude { flag: String },

    /// A compatibility range does not parse
    InvalidRange {
        flag: String,
        dependency: String,
        range: String,
        reason: String,
    },

    /// Rollout percentage above 100 (clamped during resolution)
    PercentageOutOfRange { flag: String, percentage: u8 },
}

impl CatalogueIssue {
    /// Name of the flag the issue belongs to
    pub fn flag(&self) -> &str {
        match self {
            Self::UnknownInclude { flag, .. }
            | Self::SelfInclude { flag }
            | Self::InvalidRange { flag, .. }
            | Self::PercentageOutOfRange { flag, .. } => flag,
        }
    }
}

impl fmt::Display for CatalogueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownInclude { flag, included } => {
                write!(f, "{} includes unknown flag {}", flag, included)
            }
            Self::SelfInclude { flag } => write!(f, "{} includes itself", flag),
            Self::InvalidRange {
                flag,
                dependency,
                range,
                reason,
            } => write!(
                f,
                "{} has an invalid range '{}' for {}: {}",
                flag, range, dependency, reason
            ),
            Self::PercentageOutOfRange { flag, percentage } => write!(
                f,
                "{} rolls out to {}% (will be treated as 100%)",
                flag, percentage
            ),
        }
    }
}
