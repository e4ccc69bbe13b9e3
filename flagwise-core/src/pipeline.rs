//! Resolution stages
//!
//! Each stage takes an ordered [`FlagSet`] and returns a new one. Stages are
//! pure apart from the version lookups and rollout samples they consult.

use crate::catalogue::Catalogue;
use crate::compat::{VersionResolver, is_usable};
use crate::context::{ExecutionContext, UserFlagConfig};
use crate::flag::FlagDefinition;
use crate::rollout::RolloutOracle;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// How a flag ended up enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Enablement {
    /// Set to `true` in the user config
    Explicit,
    /// Opted in through gradual rollout
    Rollout,
    /// Pulled in by another enabled flag
    Included,
}

/// An enabled flag and the reason it is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedFlag<'a> {
    #[serde(flatten)]
    pub definition: &'a FlagDefinition,
    pub enablement: Enablement,
}

impl<'a> ResolvedFlag<'a> {
    pub fn new(definition: &'a FlagDefinition, enablement: Enablement) -> Self {
        Self {
            definition,
            enablement,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.definition.name
    }

    /// Enabled through gradual rollout
    pub fn is_opted_in(&self) -> bool {
        self.enablement == Enablement::Rollout
    }
}

/// Insertion-ordered set of resolved flags, unique by name.
#[derive(Debug, Clone, Default)]
pub struct FlagSet<'a> {
    entries: IndexMap<&'a str, ResolvedFlag<'a>>,
}

impl<'a> FlagSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag unless one with the same name is present. First insert wins.
    pub fn insert(&mut self, flag: ResolvedFlag<'a>) -> bool {
        if self.entries.contains_key(flag.name()) {
            return false;
        }
        self.entries.insert(flag.name(), flag);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedFlag<'a>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedFlag<'a>> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.keys().copied()
    }

    /// Keep only flags matching the predicate, preserving order
    pub fn filter(self, mut keep: impl FnMut(&ResolvedFlag<'a>) -> bool) -> Self {
        self.entries
            .into_values()
            .filter(|flag| keep(flag))
            .collect()
    }

    pub fn into_vec(self) -> Vec<ResolvedFlag<'a>> {
        self.entries.into_values().collect()
    }
}

impl<'a> FromIterator<ResolvedFlag<'a>> for FlagSet<'a> {
    fn from_iter<I: IntoIterator<Item = ResolvedFlag<'a>>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

/// Catalogue flags whose compatibility constraints hold, in catalogue order
pub fn available_flags<'a>(
    catalogue: &'a Catalogue,
    versions: &dyn VersionResolver,
) -> Vec<&'a FlagDefinition> {
    catalogue
        .iter()
        .filter(|flag| is_usable(flag, versions))
        .collect()
}

/// Base set: available flags set to `true`, in config order
pub fn explicit_flags<'a>(available: &[&'a FlagDefinition], config: &UserFlagConfig) -> FlagSet<'a> {
    let by_name: HashMap<&str, &'a FlagDefinition> = available
        .iter()
        .map(|flag| (flag.name.as_str(), *flag))
        .collect();

    let set: FlagSet<'a> = config
        .iter()
        .filter(|(_, enabled)| *enabled)
        .filter_map(|(name, _)| by_name.get(name).copied())
        .map(|flag| ResolvedFlag::new(flag, Enablement::Explicit))
        .collect();

    trace!(count = set.len(), "Explicitly enabled flags");
    set
}

/// Add flags the rollout oracle opts this site into.
///
/// The oracle is never consulted for flags the user disabled, and it is asked
/// before the compatibility check. Flags already enabled keep their original
/// enablement.
pub fn apply_rollout<'a>(
    enabled: FlagSet<'a>,
    available: &[&'a FlagDefinition],
    config: &UserFlagConfig,
    versions: &dyn VersionResolver,
    oracle: &dyn RolloutOracle,
) -> FlagSet<'a> {
    let mut enabled = enabled;

    for &flag in available {
        let Some(rollout) = flag.gradual_rollout else {
            continue;
        };

        if config.is_disabled(&flag.name) {
            trace!(flag = %flag.name, "Rollout skipped, disabled by user");
            continue;
        }

        if oracle.sample(&flag.name, rollout.effective_percentage())
            && is_usable(flag, versions)
            && enabled.insert(ResolvedFlag::new(flag, Enablement::Rollout))
        {
            debug!(
                flag = %flag.name,
                percentage = rollout.effective_percentage(),
                "Flag enabled through gradual rollout"
            );
        }
    }

    enabled
}

/// Drop flags that do not apply to the executing command or CI environment
pub fn apply_scope<'a>(
    enabled: FlagSet<'a>,
    context: &ExecutionContext,
    versions: &dyn VersionResolver,
) -> FlagSet<'a> {
    enabled.filter(|flag| {
        let definition = flag.definition;

        if !definition.command.applies_to(&context.executing_command) {
            debug!(
                flag = %definition.name,
                command = %definition.command,
                executing = %context.executing_command,
                "Flag does not apply to this command"
            );
            return false;
        }

        if definition.no_ci && context.is_ci {
            debug!(flag = %definition.name, "Flag suppressed in CI");
            return false;
        }

        is_usable(definition, versions)
    })
}

/// Add every flag transitively included by an enabled flag.
///
/// Included names are looked up in the whole catalogue, so an included flag
/// is enabled even if the user disabled it or it is out of scope. Included
/// flags must still be compatible. Walks depth-first with an explicit stack;
/// flags already visited are not expanded again.
pub fn expand_inclusions<'a>(
    enabled: FlagSet<'a>,
    catalogue: &'a Catalogue,
    versions: &dyn VersionResolver,
) -> FlagSet<'a> {
    let flags = catalogue.as_slice();
    let mut visited = vec![false; flags.len()];
    let roots: Vec<usize> = enabled
        .names()
        .filter_map(|name| catalogue.index_of(name))
        .collect();
    for &root in &roots {
        visited[root] = true;
    }

    let mut expanded = enabled;
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in roots {
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let parent = &flags[frame.0];
            let Some(included) = parent.included_flags.get(frame.1) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let Some(child) = catalogue.index_of(included) else {
                debug!(flag = %parent.name, included = %included, "Included flag not in catalogue");
                continue;
            };
            if visited[child] {
                continue;
            }
            visited[child] = true;

            let definition = &flags[child];
            if !is_usable(definition, versions) {
                continue;
            }

            trace!(flag = %definition.name, parent = %parent.name, "Including flag");
            expanded.insert(ResolvedFlag::new(definition, Enablement::Included));
            stack.push((child, 0));
        }
    }

    expanded
}
