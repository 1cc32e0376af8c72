//! Meter-marker stripping.
//!
//! Removes bracketed time-signature markers such as `[M:4/4]` from a raw corpus
//! before it is split into tunes. A marker is removed together with the line
//! break or single space that follows it, so a meter line between the index and
//! key lines disappears completely.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::NormalizeError;

/// Meters recognised by the folk-tune corpus tokenizer.
pub const DEFAULT_METERS: [&str; 9] = [
    "8/8", "4/4", "2/2", "3/4", "2/4", "6/8", "8/16", "5/4", "3/8",
];

static DEFAULT_STRIPPER: LazyLock<MeterStripper> = LazyLock::new(|| {
    let meters: Vec<String> = DEFAULT_METERS.iter().map(|m| m.to_string()).collect();
    MeterStripper::new(&meters).unwrap_or_else(|_| MeterStripper { pattern: None })
});

/// Strips a closed set of meter markers from corpus text.
#[derive(Debug, Clone)]
pub struct MeterStripper {
    // None when there is nothing to strip
    pattern: Option<Regex>,
}

impl MeterStripper {
    pub fn new(meters: &[String]) -> Result<Self, NormalizeError> {
        let alternatives: Vec<String> = meters
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let source = format!(r"\[M:(?:{})\](?:\r?\n| )?", alternatives.join("|"));
        let pattern = Regex::new(&source)
            .map_err(|e| NormalizeError::Config(format!("meter pattern: {}", e)))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Remove every marker. Repeats until none is left, since removing one
    /// marker can splice two fragments into a new one.
    pub fn strip(&self, corpus: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return corpus.to_string();
        };

        let mut text = corpus.to_string();
        while pattern.is_match(&text) {
            text = pattern.replace_all(&text, "").into_owned();
        }
        text
    }

    /// True if any marker remains in `corpus`.
    pub fn contains_meter(&self, corpus: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(corpus))
    }
}

impl Default for MeterStripper {
    fn default() -> Self {
        DEFAULT_STRIPPER.clone()
    }
}

/// Strip the default meter set.
pub fn remove_meters(corpus: &str) -> String {
    DEFAULT_STRIPPER.strip(corpus)
}
