//! Resolve command - compute the active flags for a run.

use colored::Colorize;
use flagwise_config::{EnvLoader, EnvProbe, load_catalogue, load_lockfile, load_user_flags};
use flagwise_core::{FlagResolver, SiteSampler, TerminalLinks, UserFlagConfig};

use crate::ResolveArgs;
use crate::error::{CliError, CliResult};

/// Resolve flags and print the summary message.
pub fn run(args: &ResolveArgs) -> CliResult<()> {
    if args.command.trim().is_empty() {
        return Err(CliError::InvalidArgument(
            "--command must not be empty".to_string(),
        ));
    }

    let catalogue = load_catalogue(&args.catalogue)?;

    let env = EnvLoader::default();
    env.load_dotenv(args.env_file.as_deref())?;

    let mut config = match &args.config {
        Some(path) => load_user_flags(path)?,
        None => UserFlagConfig::new(),
    };
    env.apply(&mut config)?;

    let mut context = EnvProbe::from_env().context(args.command.trim());
    if let Some(is_ci) = args.ci_override() {
        context.is_ci = is_ci;
    }

    let mut resolver = FlagResolver::new(catalogue);
    if let Some(path) = &args.lockfile {
        resolver = resolver.with_versions(load_lockfile(path)?);
    }
    if let Some(site_id) = &args.site_id {
        resolver = resolver.with_oracle(SiteSampler::new(site_id.as_str()));
    }
    if args.hyperlinks {
        resolver = resolver.with_links(TerminalLinks);
    }

    let result = resolver.resolve(&config, &context);
    tracing::debug!(
        enabled = result.enabled_flags.len(),
        unknown = result.unknown_flags.len(),
        "Resolved flags"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.unknown_flag_message.is_empty() {
        eprintln!("{}", result.unknown_flag_message.yellow());
    }
    print!("{}", result.message);

    Ok(())
}
