//! # Error Types
//!
//! Errors raised while normalizing a corpus.
//!
//! The per-tune variants (`MalformedTune`, `MalformedKey`, `UnknownMode`) never
//! escape [`crate::rewriter::rewrite_corpus`]: the rewriter drops the offending
//! tune and records the reason in its report. Only `Config` reaches callers of
//! [`crate::normalize`].
//!
//! A body token that is not a pitch (bar line, rest, duration) is not an error at
//! all. It passes through the transposer unchanged.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// A tune chunk that does not have the index/key/body line structure.
    ///
    /// # Example
    /// ```
    /// # use folknorm::NormalizeError;
    /// let err = NormalizeError::MalformedTune { lines: 5 };
    /// assert_eq!(err.to_string(), "Malformed tune: expected 3 lines, found 5");
    /// ```
    #[error("Malformed tune: expected 3 lines, found {lines}")]
    MalformedTune { lines: usize },

    /// A key line that is not shaped like `[K:<tonic>[b|#]...<mode>]`.
    #[error("Malformed key line: {0}")]
    MalformedKey(String),

    /// A mode code outside Maj/Dor/Phr/Lyd/Mix/Min/Loc.
    ///
    /// # Example
    /// ```
    /// # use folknorm::NormalizeError;
    /// let err = NormalizeError::UnknownMode("xyz".to_string());
    /// assert_eq!(err.to_string(), "Unknown mode: xyz");
    /// ```
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// Invalid configuration (unreadable YAML, unusable meter list).
    #[error("Invalid configuration: {0}")]
    Config(String),
}
