//! Side-by-side view of tunes before and after transposition.
//!
//! Used for spot-checking a rewrite run by hand. Positions refer to the tunes
//! of the original corpus; the rewritten tune is looked up by its index line
//! because dropped tunes shift every later position.

use std::collections::HashMap;
use std::fmt;

use crate::rewriter::{split_tunes, Tune};

/// Original and rewritten body of one tune.
#[derive(Debug, Clone, PartialEq)]
pub struct TuneComparison {
    pub position: usize,
    pub index: Option<String>,
    pub original: Option<String>,
    /// `None` when the tune was dropped by the rewrite
    pub transposed: Option<String>,
}

impl fmt::Display for TuneComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(original) = &self.original else {
            return writeln!(f, "Tune {}: not in original corpus", self.position);
        };
        writeln!(
            f,
            "Tune {} ({})",
            self.position,
            self.index.as_deref().unwrap_or("")
        )?;
        writeln!(f, "  original:   {}", original)?;
        match &self.transposed {
            Some(transposed) => writeln!(f, "  transposed: {}", transposed),
            None => writeln!(f, "  transposed: (dropped)"),
        }
    }
}

/// Compare the tunes at `positions` of `before` with their rewritten form in `after`.
pub fn compare_tunes(before: &str, after: &str, positions: &[usize]) -> Vec<TuneComparison> {
    let originals: Vec<&str> = split_tunes(before).collect();

    let mut rewritten: HashMap<&str, &str> = HashMap::new();
    for tune in split_tunes(after).filter_map(|chunk| Tune::parse(chunk).ok()) {
        rewritten.entry(tune.index).or_insert(tune.body);
    }

    positions
        .iter()
        .map(|&position| {
            let Some(chunk) = originals.get(position) else {
                return TuneComparison {
                    position,
                    index: None,
                    original: None,
                    transposed: None,
                };
            };
            let mut lines = chunk.lines();
            let index = lines.next().unwrap_or_default();
            // malformed chunks have no body line of their own; show them whole
            let original = match Tune::parse(chunk) {
                Ok(tune) => tune.body.to_string(),
                Err(_) => chunk.to_string(),
            };
            TuneComparison {
                position,
                index: Some(index.to_string()),
                original: Some(original),
                transposed: rewritten.get(index).map(|body| body.to_string()),
            }
        })
        .collect()
}
