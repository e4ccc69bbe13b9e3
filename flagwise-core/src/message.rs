//! Human readable resolution summary

use crate::context::UserFlagConfig;
use crate::flag::FlagDefinition;
use crate::pipeline::FlagSet;

/// Renders a hyperlink.
pub trait LinkFormatter: Send + Sync {
    fn link(&self, text: &str, url: &str) -> String;
}

impl<F> LinkFormatter for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn link(&self, text: &str, url: &str) -> String {
        self(text, url)
    }
}

/// `text (url)`, for logs and non-interactive output
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLinks;

impl LinkFormatter for PlainLinks {
    fn link(&self, text: &str, url: &str) -> String {
        format!("{} ({})", text, url)
    }
}

/// OSC 8 terminal hyperlinks
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalLinks;

impl LinkFormatter for TerminalLinks {
    fn link(&self, text: &str, url: &str) -> String {
        format!("\u{1b}]8;;{}\u{1b}\\{}\u{1b}]8;;\u{1b}\\", url, text)
    }
}

pub const ACTIVE_HEADER: &str = "The following flags are active:";

pub const ROLLOUT_EXPLANATION: &str = "\
We're shipping new features! For final testing, they are rolled out to a small percentage of sites first,
and your site was automatically chosen as one of them. With your help, they will then be released to everyone.

Please report any feedback, good or bad, in the umbrella issue. If you run into problems, disable the flag
by setting it to false in your configuration:

[flags]
THE_FLAG = false

The following flags were automatically enabled on your site:";

/// One list entry, including the leading newline
pub fn flag_line(flag: &FlagDefinition, links: &dyn LinkFormatter) -> String {
    let mut line = format!("\n- {}", flag.name);

    if flag.experimental {
        line.push_str(" · EXPERIMENTAL");
    }
    if let Some(url) = &flag.umbrella_issue_url {
        line.push_str(&format!(" · ({})", links.link("Umbrella Issue", url)));
    }

    line.push_str(" · ");
    line.push_str(&flag.description);
    line
}

/// Summary of active, rolled-out and other available flags.
///
/// Empty when nothing is enabled. The "other flags" listing is only shown
/// when the user configured at least one flag.
pub fn build_message(
    enabled: &FlagSet<'_>,
    available: &[&FlagDefinition],
    config: &UserFlagConfig,
    links: &dyn LinkFormatter,
) -> String {
    if enabled.is_empty() {
        return String::new();
    }

    let mut message = String::new();

    let mut explicit = enabled.iter().filter(|flag| !flag.is_opted_in()).peekable();
    if explicit.peek().is_some() {
        message.push_str(ACTIVE_HEADER);
        for flag in explicit {
            message.push_str(&flag_line(flag.definition, links));
        }
    }

    let mut opted_in = enabled.iter().filter(|flag| flag.is_opted_in()).peekable();
    if opted_in.peek().is_some() {
        if !message.is_empty() {
            message.push_str("\n\n");
        }
        message.push_str(ROLLOUT_EXPLANATION);
        for flag in opted_in {
            message.push_str(&flag_line(flag.definition, links));
        }
    }

    let other_count = available.len().saturating_sub(enabled.len());
    if other_count > 0 && !config.is_empty() {
        if other_count == 1 {
            message.push_str("\n\nThere is one other flag available that you might be interested in:");
        } else {
            message.push_str(&format!(
                "\n\nThere are {} other flags available that you might be interested in:",
                other_count
            ));
        }

        for flag in available.iter().filter(|flag| !enabled.contains(&flag.name)) {
            message.push_str(&flag_line(flag, links));
        }
    }

    message.push('\n');
    message
}
