//! # Tune Rewriter
//!
//! Splits a corpus into tunes, transposes each one and reassembles the text.
//!
//! ## Pipeline
//! 1. Split the corpus on blank lines
//! 2. Drop chunks that are not exactly index line / key line / body line
//! 3. Parse the key line, dropping tunes whose key cannot be read
//! 4. Compute the shift and transpose the body
//! 5. Rejoin the surviving tunes, in input order, with one blank line between
//!
//! Dropping is a filter, not a failure: every dropped tune is counted in the
//! [`RewriteReport`] and nothing aborts the run. Each tune is rewritten on its
//! own, so the per-tune step can run on a rayon pool without changing the
//! output.

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::NormalizeError;
use crate::key::{parse_key_line, Key};
use crate::shift::shift_for_key;
use crate::transpose::transpose_body;

/// Separator between tunes in the rewritten corpus.
pub const TUNE_SEPARATOR: &str = "\n\n";

// One or more blank lines, LF or CRLF, possibly holding spaces or tabs.
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("valid blank-line pattern"));

/// One well-formed tune, borrowed from the corpus text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tune<'a> {
    /// Index/title line
    pub index: &'a str,
    /// Key-declaration line, kept verbatim in the output
    pub key: &'a str,
    /// Whitespace-tokenized note body
    pub body: &'a str,
}

impl<'a> Tune<'a> {
    /// Check the three-line structure of a corpus chunk.
    pub fn parse(chunk: &'a str) -> Result<Self, NormalizeError> {
        let lines: Vec<&str> = chunk.lines().collect();
        match lines.as_slice() {
            &[index, key, body] => Ok(Tune { index, key, body }),
            _ => Err(NormalizeError::MalformedTune { lines: lines.len() }),
        }
    }

    pub fn key(&self) -> Result<Key, NormalizeError> {
        parse_key_line(self.key)
    }
}

/// Split corpus text into candidate tune chunks on blank lines.
///
/// A line holding only spaces or tabs counts as blank, and CRLF line endings
/// are accepted. Whitespace-only chunks (leading or trailing blank lines) are
/// skipped.
pub fn split_tunes(corpus: &str) -> impl Iterator<Item = &str> {
    let corpus = corpus.strip_prefix('\u{feff}').unwrap_or(corpus);
    BLANK_LINES_RE
        .split(corpus)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
}

/// Rewrite one chunk: index line, unchanged key line, transposed body.
pub fn rewrite_tune(chunk: &str) -> Result<String, NormalizeError> {
    let tune = Tune::parse(chunk)?;
    let key = tune.key()?;
    let shift = shift_for_key(&key);
    let body = transpose_body(tune.body, shift);
    Ok([tune.index, tune.key, body.as_str()].join("\n"))
}

/// A tune that was filtered out, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedTune {
    /// 0-based position among the corpus chunks
    pub position: usize,
    pub reason: String,
}

/// Aggregate counts from one rewrite run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RewriteReport {
    pub tunes_read: usize,
    pub tunes_retained: usize,
    pub malformed_tunes: usize,
    pub malformed_keys: usize,
    pub unknown_modes: usize,
    pub dropped: Vec<DroppedTune>,
}

impl RewriteReport {
    pub fn tunes_dropped(&self) -> usize {
        self.tunes_read - self.tunes_retained
    }

    fn record_drop(&mut self, position: usize, err: &NormalizeError) {
        match err {
            NormalizeError::MalformedTune { .. } => self.malformed_tunes += 1,
            NormalizeError::MalformedKey(_) => self.malformed_keys += 1,
            NormalizeError::UnknownMode(_) => self.unknown_modes += 1,
            NormalizeError::Config(_) => {
                unreachable!("rewrite_tune never returns configuration errors")
            }
        }
        log::debug!("Dropping tune {}: {}", position, err);
        self.dropped.push(DroppedTune {
            position,
            reason: err.to_string(),
        });
    }
}

/// Rewritten corpus text plus the counts behind it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rewritten {
    pub text: String,
    pub report: RewriteReport,
}

/// Transpose every tune of `corpus` to its major equivalent on C.
///
/// Never fails: malformed tunes are dropped and counted. With `parallel` the
/// per-tune work runs on the rayon global pool; the output is identical
/// either way.
pub fn rewrite_corpus(corpus: &str, parallel: bool) -> Rewritten {
    let chunks: Vec<&str> = split_tunes(corpus).collect();

    let outcomes: Vec<Result<String, NormalizeError>> = if parallel {
        chunks.par_iter().map(|chunk| rewrite_tune(chunk)).collect()
    } else {
        chunks.iter().map(|chunk| rewrite_tune(chunk)).collect()
    };

    let mut report = RewriteReport {
        tunes_read: chunks.len(),
        ..RewriteReport::default()
    };
    let mut tunes = Vec::with_capacity(outcomes.len());
    for (position, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(tune) => tunes.push(tune),
            Err(err) => report.record_drop(position, &err),
        }
    }
    report.tunes_retained = tunes.len();

    log::info!(
        "Rewrote {} of {} tunes ({} dropped)",
        report.tunes_retained,
        report.tunes_read,
        report.tunes_dropped()
    );

    let mut text = tunes.join(TUNE_SEPARATOR);
    if !text.is_empty() {
        text.push('\n');
    }
    Rewritten { text, report }
}
