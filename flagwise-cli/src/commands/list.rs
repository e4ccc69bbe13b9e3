//! List command - show the flags of a catalogue.

use colored::Colorize;
use flagwise_config::load_catalogue;
use flagwise_core::{CommandScope, FlagDefinition};
use std::path::Path;

use crate::error::CliResult;
use crate::info;

/// Print every catalogue flag with its metadata.
pub fn run(path: &Path, json: bool) -> CliResult<()> {
    let catalogue = load_catalogue(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalogue.as_slice())?);
        return Ok(());
    }

    println!();
    info(&format!(
        "{} flag(s) in {}",
        catalogue.len().to_string().cyan(),
        path.display()
    ));
    println!();

    for flag in &catalogue {
        print_flag(flag);
    }

    Ok(())
}

fn print_flag(flag: &FlagDefinition) {
    println!("  {}", flag.name.bright_white().bold());
    if !flag.description.is_empty() {
        println!("    {}", flag.description.dimmed());
    }

    let mut details = Vec::new();
    if let CommandScope::Only(command) = &flag.command {
        details.push(format!("command: {}", command));
    }
    if flag.no_ci {
        details.push("not in CI".to_string());
    }
    if let Some(rollout) = flag.gradual_rollout {
        details.push(format!("rollout: {}%", rollout.effective_percentage()));
    }
    if flag.experimental {
        details.push("experimental".yellow().to_string());
    }
    for (dependency, range) in &flag.compatibility {
        details.push(format!("requires {} {}", dependency, range));
    }
    if !flag.included_flags.is_empty() {
        details.push(format!("includes: {}", flag.included_flags.join(", ")));
    }
    if let Some(url) = &flag.umbrella_issue_url {
        details.push(format!("issue: {}", url));
    }

    for detail in details {
        println!("    {} {}", "·".cyan(), detail);
    }
    println!();
}
