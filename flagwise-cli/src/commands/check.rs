//! Check command - report catalogue problems.

use flagwise_config::load_catalogue;
use std::path::Path;

use crate::error::{CliError, CliResult};
use crate::{success, warn};

/// Validate a catalogue, failing when any issue is found.
pub fn run(path: &Path) -> CliResult<()> {
    let catalogue = load_catalogue(path)?;
    let issues = catalogue.validate();

    println!();
    if issues.is_empty() {
        success(&format!(
            "{} flag(s) checked, no issues found",
            catalogue.len()
        ));
        return Ok(());
    }

    for issue in &issues {
        warn(&issue.to_string());
    }
    println!();

    Err(CliError::Validation(format!(
        "{} issue(s) found in {}",
        issues.len(),
        path.display()
    )))
}
