//! Feature Flag Resolution for Flagwise
//!
//! Resolves which flags of a closed catalogue are active, given the user's
//! declared settings and the execution context.
//!
//! # Features
//!
//! - **Compatibility Gating** - Flags can require installed dependency versions
//! - **Gradual Rollout** - Deterministic per-site opt-in for a percentage of sites
//! - **Scope Filtering** - Flags restricted to a command or suppressed in CI
//! - **Inclusion** - Enabled flags transitively enable the flags they include
//! - **Diagnostics** - "Did you mean" hints for unknown flags and a summary message
//!
//! # Quick Start
//!
//! ```
//! use flagwise_core::*;
//!
//! let catalogue = Catalogue::new(vec![
//!     FlagDefinition::new("FAST_DEV", "Speed up the development server")
//!         .for_command("develop")
//!         .including("LAZY_IMAGES"),
//!     FlagDefinition::new("LAZY_IMAGES", "Process images on demand"),
//!     FlagDefinition::new("PARALLEL_BUILD", "Build pages in parallel")
//!         .with_compatibility("rayon", "^1.8"),
//! ])
//! .unwrap();
//!
//! let resolver = FlagResolver::new(catalogue);
//! let config = UserFlagConfig::new().with("FAST_DEV", true);
//! let result = resolver.resolve(&config, &ExecutionContext::new("develop"));
//!
//! assert!(result.is_enabled("LAZY_IMAGES"));
//! println!("{}", result.message);
//! ```
//!
//! # Gradual Rollout
//!
//! ```
//! use flagwise_core::*;
//!
//! let catalogue = Catalogue::new(vec![
//!     FlagDefinition::new("NEW_CACHE", "Rewritten cache").with_rollout(100),
//! ])
//! .unwrap();
//!
//! let resolver = FlagResolver::new(catalogue).with_oracle(SiteSampler::new("site-id"));
//! let result = resolver.resolve(&UserFlagConfig::new(), &ExecutionContext::new("build"));
//!
//! assert_eq!(result.opted_in().count(), 1);
//! ```

pub mod catalogue;
pub mod compat;
pub mod context;
pub mod error;
pub mod flag;
pub mod message;
pub mod pipeline;
pub mod resolver;
pub mod rollout;
pub mod suggest;

pub use catalogue::{Catalogue, CatalogueIssue};
pub use compat::{InstalledVersions, VersionResolver, check_compatibility, is_usable};
pub use context::{ExecutionContext, UserFlagConfig};
pub use error::{FlagError, FlagResult};
pub use flag::{CommandScope, FlagDefinition, GradualRollout};
pub use message::{LinkFormatter, PlainLinks, TerminalLinks};
pub use pipeline::{Enablement, FlagSet, ResolvedFlag};
pub use resolver::{FlagResolver, ResolutionResult};
pub use rollout::{NoRollout, RolloutOracle, SiteSampler};
pub use suggest::UnknownFlag;

pub use semver::Version;
