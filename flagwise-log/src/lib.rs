//! Flagwise Logging
//!
//! Installs a `tracing` subscriber configured from `FLAGWISE_*` environment
//! variables. Library crates emit events through `tracing` directly; binaries
//! call [`init`] once at startup.
//!
//! # Usage
//!
//! ```rust
//! use flagwise_log::{Level, LogConfig};
//!
//! let config = LogConfig::from_env().with_level(Level::Debug);
//! flagwise_log::init_with(&config);
//!
//! tracing::debug!(flag = "FAST_DEV", "Resolving");
//! ```
//!
//! # Environment Variables
//!
//! - `FLAGWISE_DEBUG=1` - Enable debug logging
//! - `FLAGWISE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `FLAGWISE_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `FLAGWISE_LOG_COLOR=1|0` - Enable/disable colors
//! - `RUST_LOG` - Overrides the level with a full filter directive

use once_cell::sync::{Lazy, OnceCell};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt as fmt_layer;
use tracing_subscriber::prelude::*;

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    Debug,
    Info,
    Warn,
    /// Error level (least verbose)
    Error,
    /// No logging
    Off,
}

impl Level {
    /// Directive understood by `EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// Single-line
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    pub format: Format,
    /// Whether ANSI colors are enabled
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Compact,
            color: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_true = |value: String| value == "1" || value.eq_ignore_ascii_case("true");

        let debug = lookup("FLAGWISE_DEBUG").map(is_true).unwrap_or(false);

        let level = lookup("FLAGWISE_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Warn });

        let format = lookup("FLAGWISE_LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Compact);

        let color = lookup("FLAGWISE_LOG_COLOR")
            .map(is_true)
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        Self {
            debug,
            level,
            format,
            color,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_filter()))
    }
}

// ============================================================================
// Public API
// ============================================================================

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Install the global subscriber using [`config`].
///
/// Returns whether a subscriber from this crate is installed. Repeated calls
/// are no-ops.
pub fn init() -> bool {
    init_with(config())
}

/// Install the global subscriber with an explicit configuration.
///
/// Only the first call has an effect.
pub fn init_with(config: &LogConfig) -> bool {
    *INSTALLED.get_or_init(|| subscriber(config).try_init().is_ok())
}

/// Build a subscriber without installing it.
pub fn subscriber(config: &LogConfig) -> impl tracing::Subscriber + Send + Sync + 'static {
    let output = match config.format {
        Format::Pretty => fmt_layer::layer()
            .pretty()
            .with_ansi(config.color)
            .with_writer(std::io::stderr)
            .boxed(),
        Format::Compact => fmt_layer::layer()
            .compact()
            .with_ansi(config.color)
            .with_writer(std::io::stderr)
            .boxed(),
        Format::Json => fmt_layer::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(config.filter())
}

// ============================================================================
// Tests
// ============================================================================
