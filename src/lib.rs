// Flagwise - feature flag resolution for Rust tools
//
// Resolves which flags of a closed catalogue are active for a run, with
// compatibility gating, gradual rollout, scoped activation and transitive
// inclusion.

// Re-export core functionality
pub use flagwise_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use flagwise_config;

#[cfg(feature = "log")]
pub use flagwise_log;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        Catalogue,
        Enablement,
        ExecutionContext,
        FlagDefinition,
        FlagResolver,
        ResolutionResult,
        SiteSampler,
        UserFlagConfig,
        Version,
    };

    #[cfg(feature = "config")]
    pub use flagwise_config::{EnvLoader, EnvProbe, load_catalogue, load_lockfile, load_user_flags};
}
