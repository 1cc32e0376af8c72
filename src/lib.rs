pub mod compare;
pub mod config;
pub mod error;
pub mod key;
pub mod meter;
pub mod rewriter;
pub mod scale;
pub mod shift;
pub mod transpose;

pub use compare::{compare_tunes, TuneComparison};
pub use config::NormalizerConfig;
pub use error::*;
pub use key::{parse_key_line, Key, Mode};
pub use meter::{remove_meters, MeterStripper};
pub use rewriter::{rewrite_corpus, RewriteReport, Rewritten};
pub use shift::{shift_for_key, ShiftDistance};
pub use transpose::{transpose_body, transpose_token};

/// Output of a full normalization run.
pub type Normalized = Rewritten;

/// Normalize a corpus: strip meter markers, then transpose every tune to its
/// major equivalent on C.
/// This is the main entry point for the library.
///
/// Malformed tunes never make this fail; they are dropped and counted in the
/// report. Only an unusable configuration returns an error.
pub fn normalize(corpus: &str, config: &NormalizerConfig) -> Result<Normalized, NormalizeError> {
    let stripped = match config.meter_stripper()? {
        Some(stripper) => stripper.strip(corpus),
        None => corpus.to_string(),
    };
    Ok(rewrite_corpus(&stripped, config.parallel))
}

/// Normalize with the default meter set, sequentially.
pub fn normalize_default(corpus: &str) -> Normalized {
    rewrite_corpus(&remove_meters(corpus), false)
}
