//! Flagwise CLI - resolve, list and check feature flag catalogues.
//!
//! # Commands
//!
//! - `flagwise resolve` - Resolve active flags and print the summary message
//! - `flagwise list` - List the flags of a catalogue
//! - `flagwise check` - Report problems in a catalogue

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use flagwise_log::{Level, LogConfig};
use std::path::PathBuf;

mod commands;
mod error;

use commands::{check, list, resolve};
use error::CliResult;

/// Flagwise - feature flag resolution
#[derive(Parser)]
#[command(name = "flagwise")]
#[command(version)]
#[command(about = "Resolve and inspect feature flag catalogues")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} flagwise resolve --catalogue flags.toml --config flagwise.toml --command develop\n  {} flagwise check --catalogue flags.toml",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve which flags are active
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// List the flags of a catalogue
    #[command(alias = "ls")]
    List(ListArgs),

    /// Check a catalogue for problems
    Check(CheckArgs),
}

#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Catalogue file (JSON or TOML)
    #[arg(long, env = "FLAGWISE_CATALOGUE")]
    catalogue: PathBuf,

    /// User flag settings (JSON or TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command being executed
    #[arg(long, default_value = "build")]
    command: String,

    /// Treat the environment as CI
    #[arg(long, conflicts_with = "no_ci")]
    ci: bool,

    /// Treat the environment as not CI
    #[arg(long)]
    no_ci: bool,

    /// Cargo.lock providing installed dependency versions
    #[arg(long)]
    lockfile: Option<PathBuf>,

    /// Site identifier for gradual rollout sampling
    #[arg(long, env = "FLAGWISE_SITE_ID")]
    site_id: Option<String>,

    /// `.env` file to load before reading overrides
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Render links as terminal hyperlinks
    #[arg(long)]
    hyperlinks: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl ResolveArgs {
    /// Explicit CI override, if any
    pub(crate) fn ci_override(&self) -> Option<bool> {
        if self.ci {
            Some(true)
        } else if self.no_ci {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Catalogue file (JSON or TOML)
    #[arg(long, env = "FLAGWISE_CATALOGUE")]
    catalogue: PathBuf,

    /// Print the catalogue as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Catalogue file (JSON or TOML)
    #[arg(long, env = "FLAGWISE_CATALOGUE")]
    catalogue: PathBuf,
}

fn success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg.green());
}

fn warn(msg: &str) {
    println!("  {} {}", "⚠".yellow().bold(), msg.yellow());
}

fn info(msg: &str) {
    println!("  {} {}", "→".cyan(), msg);
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose {
        config = config.with_level(Level::Debug);
    }
    if cli.no_color {
        config = config.with_color(false);
    }
    flagwise_log::init_with(&config);
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(&cli);

    let result: CliResult<()> = match &cli.command {
        Commands::Resolve(args) => resolve::run(args),
        Commands::List(args) => list::run(&args.catalogue, args.json),
        Commands::Check(args) => check::run(&args.catalogue),
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}
