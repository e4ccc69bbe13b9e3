//! Flag resolver
//!
//! Runs the resolution stages in order and renders the summary messages.

use crate::catalogue::Catalogue;
use crate::compat::{InstalledVersions, VersionResolver};
use crate::context::{ExecutionContext, UserFlagConfig};
use crate::message::{LinkFormatter, PlainLinks, build_message};
use crate::pipeline::{
    ResolvedFlag, apply_rollout, apply_scope, available_flags, expand_inclusions, explicit_flags,
};
use crate::rollout::{NoRollout, RolloutOracle};
use crate::suggest::{UnknownFlag, detect_unknown, unknown_flag_message};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Outcome of a resolution call
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult<'a> {
    /// Active flags, unique by name, in resolution order
    pub enabled_flags: Vec<ResolvedFlag<'a>>,
    /// Configured keys that matched no available flag
    pub unknown_flags: Vec<UnknownFlag>,
    /// Warning text about unknown keys (empty if none)
    pub unknown_flag_message: String,
    /// Summary of active and available flags (empty if none active)
    pub message: String,
}

impl<'a> ResolutionResult<'a> {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled_flags.iter().any(|flag| flag.name() == name)
    }

    pub fn enabled_names(&self) -> Vec<&'a str> {
        self.enabled_flags.iter().map(|flag| flag.name()).collect()
    }

    /// Flags enabled through gradual rollout
    pub fn opted_in(&self) -> impl Iterator<Item = &ResolvedFlag<'a>> {
        self.enabled_flags.iter().filter(|flag| flag.is_opted_in())
    }
}

/// Resolves user flag settings against a catalogue.
///
/// # Examples
///
/// ```
/// use flagwise_core::*;
///
/// let catalogue = Catalogue::new(vec![
///     FlagDefinition::new("FAST_DEV", "Faster develop").including("DEV_SSR"),
///     FlagDefinition::new("DEV_SSR", "Server-side rendering in develop"),
/// ])
/// .unwrap();
///
/// let resolver = FlagResolver::new(catalogue);
/// let config = UserFlagConfig::new().with("FAST_DEV", true);
/// let result = resolver.resolve(&config, &ExecutionContext::new("develop"));
///
/// assert_eq!(result.enabled_names(), vec!["FAST_DEV", "DEV_SSR"]);
/// ```
#[derive(Clone)]
pub struct FlagResolver {
    catalogue: Arc<Catalogue>,
    versions: Arc<dyn VersionResolver>,
    oracle: Arc<dyn RolloutOracle>,
    links: Arc<dyn LinkFormatter>,
}

impl FlagResolver {
    /// Create a resolver with no installed dependencies, no rollout and
    /// plain-text links
    pub fn new(catalogue: impl Into<Arc<Catalogue>>) -> Self {
        Self {
            catalogue: catalogue.into(),
            versions: Arc::new(InstalledVersions::new()),
            oracle: Arc::new(NoRollout),
            links: Arc::new(PlainLinks),
        }
    }

    /// Set the installed version lookup
    pub fn with_versions(mut self, versions: impl VersionResolver + 'static) -> Self {
        self.versions = Arc::new(versions);
        self
    }

    /// Set the rollout oracle
    pub fn with_oracle(mut self, oracle: impl RolloutOracle + 'static) -> Self {
        self.oracle = Arc::new(oracle);
        self
    }

    /// Set the hyperlink renderer
    pub fn with_links(mut self, links: impl LinkFormatter + 'static) -> Self {
        self.links = Arc::new(links);
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Resolve the active flags for a config and execution context
    pub fn resolve(&self, config: &UserFlagConfig, context: &ExecutionContext) -> ResolutionResult<'_> {
        trace!(
            command = %context.executing_command,
            is_ci = context.is_ci,
            catalogue = self.catalogue.len(),
            configured = config.len(),
            "Resolving flags"
        );

        let versions = self.versions.as_ref();
        let available = available_flags(&self.catalogue, versions);
        let unknown_flags = detect_unknown(config, &available);

        let enabled = explicit_flags(&available, config);
        let enabled = apply_rollout(enabled, &available, config, versions, self.oracle.as_ref());
        let enabled = apply_scope(enabled, context, versions);
        let enabled = expand_inclusions(enabled, &self.catalogue, versions);

        let message = build_message(&enabled, &available, config, self.links.as_ref());
        let unknown_flag_message = unknown_flag_message(&unknown_flags);

        debug!(
            enabled = enabled.len(),
            available = available.len(),
            unknown = unknown_flags.len(),
            "Resolved flags"
        );

        ResolutionResult {
            enabled_flags: enabled.into_vec(),
            unknown_flags,
            unknown_flag_message,
            message,
        }
    }
}

impl fmt::Debug for FlagResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagResolver")
            .field("catalogue", &self.catalogue.len())
            .finish_non_exhaustive()
    }
}
