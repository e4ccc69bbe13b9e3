//! Configuration loading for Flagwise
//!
//! Reads the pieces a resolution needs from the outside world:
//!
//! - Flag catalogues and user flag settings from JSON or TOML files
//! - `FLAGWISE_FLAG_<NAME>` overrides from the environment (and `.env`)
//! - CI detection for the execution context
//! - Installed dependency versions from `Cargo.lock`
//!
//! # Example
//!
//! ```no_run
//! use flagwise_config::{EnvLoader, EnvProbe, load_catalogue, load_lockfile, load_user_flags};
//! use flagwise_core::FlagResolver;
//!
//! # fn main() -> flagwise_config::Result<()> {
//! let catalogue = load_catalogue("flags.toml")?;
//! let mut config = load_user_flags("flagwise.toml")?;
//! EnvLoader::default().apply(&mut config)?;
//!
//! let resolver = FlagResolver::new(catalogue).with_versions(load_lockfile("Cargo.lock")?);
//! let result = resolver.resolve(&config, &EnvProbe::from_env().context("build"));
//! print!("{}", result.message);
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod lockfile;
pub mod probe;

pub use env::{EnvLoader, FLAG_PREFIX};
pub use error::{ConfigError, Result};
pub use loader::{
    ConfigLoader, FileFormat, catalogue_from_value, load_catalogue, load_user_flags,
    user_flags_from_value,
};
pub use lockfile::{load_lockfile, parse_lockfile};
pub use probe::{CI_VARIABLES, EnvProbe};
