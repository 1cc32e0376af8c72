use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::NormalizeError;
use crate::meter::{MeterStripper, DEFAULT_METERS};

/// Normalizer settings, read from YAML.
///
/// Every field is optional; a missing file section falls back to the
/// defaults.
///
/// ```yaml
/// strip-meters: true
/// meters: ["4/4", "6/8"]
/// parallel: true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NormalizerConfig {
    /// Remove meter markers before splitting the corpus.
    pub strip_meters: bool,
    /// Meters whose `[M:...]` markers are removed.
    pub meters: Vec<String>,
    /// Rewrite tunes on the rayon pool.
    pub parallel: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_meters: true,
            meters: DEFAULT_METERS.iter().map(|m| m.to_string()).collect(),
            parallel: false,
        }
    }
}

impl NormalizerConfig {
    pub fn from_yaml(content: &str) -> Result<Self, NormalizeError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| NormalizeError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, NormalizeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NormalizeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Stripper for the configured meters, or `None` when stripping is off.
    pub fn meter_stripper(&self) -> Result<Option<MeterStripper>, NormalizeError> {
        if !self.strip_meters {
            return Ok(None);
        }
        MeterStripper::new(&self.meters).map(Some)
    }
}
