//! Unknown flag detection with "did you mean" suggestions

use crate::context::UserFlagConfig;
use crate::flag::FlagDefinition;
use serde::Serialize;
use std::collections::HashSet;

/// Suggestions are only offered below this edit distance
pub const SUGGESTION_DISTANCE: usize = 4;

/// A configured key that matches no available flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownFlag {
    pub name: String,
    pub did_you_mean: Option<String>,
}

/// Levenshtein distance between two strings
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Closest candidate to suggest for a misspelled name.
///
/// The candidate with the smallest edit distance wins if that distance is
/// below [`SUGGESTION_DISTANCE`]; otherwise a candidate the name abbreviates
/// is offered. An abbreviation is a prefix covering at least half of the
/// candidate. Earlier candidates win ties.
pub fn closest_match<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let mut nearest: Option<(&str, usize)> = None;
    let mut abbreviated: Option<(&str, usize)> = None;

    for candidate in candidates {
        let distance = levenshtein(name, candidate);
        if nearest.is_none_or(|(_, min)| distance < min) {
            nearest = Some((candidate, distance));
        }
        if is_abbreviation(name, candidate)
            && abbreviated.is_none_or(|(_, min)| distance < min)
        {
            abbreviated = Some((candidate, distance));
        }
    }

    nearest
        .filter(|(_, distance)| *distance < SUGGESTION_DISTANCE)
        .or(abbreviated)
        .map(|(candidate, _)| candidate)
}

fn is_abbreviation(name: &str, candidate: &str) -> bool {
    !name.is_empty() && candidate.starts_with(name) && name.len() * 2 >= candidate.len()
}

/// Configured keys with no matching available flag, in config order
pub fn detect_unknown(config: &UserFlagConfig, available: &[&FlagDefinition]) -> Vec<UnknownFlag> {
    let known: HashSet<&str> = available.iter().map(|flag| flag.name.as_str()).collect();

    config
        .keys()
        .filter(|key| !known.contains(key))
        .map(|key| UnknownFlag {
            name: key.to_string(),
            did_you_mean: closest_match(key, available.iter().map(|flag| flag.name.as_str()))
                .map(str::to_string),
        })
        .collect()
}

/// Advisory text listing unknown keys; empty when there are none
pub fn unknown_flag_message(unknown: &[UnknownFlag]) -> String {
    if unknown.is_empty() {
        return String::new();
    }

    let mut message = String::from("The following flag(s) found in your configuration are not known:");
    for flag in unknown {
        message.push_str("\n- ");
        message.push_str(&flag.name);
        if let Some(suggestion) = &flag.did_you_mean {
            message.push_str(&format!(" (did you mean: {})", suggestion));
        }
    }

    message
}
