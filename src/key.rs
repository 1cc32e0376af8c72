//! # Key Parser
//!
//! Reads the tonic and mode out of a tune's key-declaration line.
//!
//! ## Key line shape
//! ```text
//! [K:Ador]     tonic A,  mode Dorian
//! [K:Ebmaj]    tonic _E, mode Major
//! [K:F#min]    tonic _G, mode Minor (sharp tonics resolve to their flat spelling)
//! ```
//!
//! The line is `[K:`, a tonic letter `A`-`G`, an optional `b` or `#`, any
//! further characters, and a 3-letter mode code right before the closing `]`.
//! Mode codes are case-insensitive. Anything else is a
//! [`NormalizeError::MalformedKey`]; a well-shaped line with an unknown code is a
//! [`NormalizeError::UnknownMode`].

use std::fmt;

use crate::error::NormalizeError;
use crate::scale::{PitchClass, Register};

/// Marker that opens every key-declaration line.
pub const KEY_MARKER: &str = "[K:";

const MODE_CODE_LEN: usize = 3;

/// Scale pattern built on a tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Minor,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Major,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Minor,
        Mode::Locrian,
    ];

    /// Parse a 3-letter mode code (`Maj`, `dor`, `MIX`, ...).
    pub fn from_code(code: &str) -> Option<Mode> {
        match code.to_ascii_lowercase().as_str() {
            "maj" => Some(Mode::Major),
            "dor" => Some(Mode::Dorian),
            "phr" => Some(Mode::Phrygian),
            "lyd" => Some(Mode::Lydian),
            "mix" => Some(Mode::Mixolydian),
            "min" => Some(Mode::Minor),
            "loc" => Some(Mode::Locrian),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Mode::Major => "Maj",
            Mode::Dorian => "Dor",
            Mode::Phrygian => "Phr",
            Mode::Lydian => "Lyd",
            Mode::Mixolydian => "Mix",
            Mode::Minor => "Min",
            Mode::Locrian => "Loc",
        }
    }

    /// Semitones from this mode's tonic up to the tonic of the major scale
    /// sharing its notes (modulo 12).
    pub fn major_offset(self) -> i32 {
        match self {
            Mode::Major => 0,
            Mode::Dorian => 10,
            Mode::Phrygian => 8,
            Mode::Lydian => 7,
            Mode::Mixolydian => 5,
            Mode::Minor => 3,
            Mode::Locrian => 1,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tonic and mode of a tune, parsed once from its key line.
///
/// Only [`parse_key_line`] builds a `Key`, so the tonic is always a
/// middle-register pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    tonic: PitchClass,
    mode: Mode,
}

impl Key {
    /// Canonical flat-spelled tonic token (`A`, `_B`, ...).
    pub fn tonic(&self) -> &'static str {
        self.tonic.token()
    }

    /// Position of the tonic in the middle register (C = 0).
    pub fn tonic_index(&self) -> usize {
        self.tonic.index
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic(), self.mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TonicAccidental {
    Natural,
    Flat,
    Sharp,
}

/// Parse a key-declaration line such as `[K:Ador]`.
pub fn parse_key_line(line: &str) -> Result<Key, NormalizeError> {
    let trimmed = line.trim();
    let malformed = || NormalizeError::MalformedKey(trimmed.to_string());

    let inner = trimmed
        .strip_prefix(KEY_MARKER)
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|inner| inner.is_ascii())
        .ok_or_else(malformed)?;

    let mut chars = inner.chars();
    let letter = chars
        .next()
        .filter(|c| ('A'..='G').contains(c))
        .ok_or_else(malformed)?;
    let accidental = match chars.next() {
        Some('b') => TonicAccidental::Flat,
        Some('#') => TonicAccidental::Sharp,
        _ => TonicAccidental::Natural,
    };

    let tonic_len = if accidental == TonicAccidental::Natural { 1 } else { 2 };
    if inner.len() < tonic_len + MODE_CODE_LEN {
        return Err(malformed());
    }

    let spelled = match accidental {
        TonicAccidental::Natural => letter.to_string(),
        TonicAccidental::Flat => format!("_{}", letter),
        TonicAccidental::Sharp => format!("^{}", letter),
    };
    // Cb, Fb, E# and B# have no canonical spelling in the middle register
    let tonic = PitchClass::from_token(&spelled)
        .filter(|pitch| pitch.register == Register::Middle)
        .ok_or_else(malformed)?;

    let code = &inner[inner.len() - MODE_CODE_LEN..];
    let mode = Mode::from_code(code).ok_or_else(|| NormalizeError::UnknownMode(code.to_string()))?;

    Ok(Key { tonic, mode })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_natural_tonic() {
        let key = parse_key_line("[K:Ador]").unwrap();
        assert_eq!(key.tonic(), "A");
        assert_eq!(key.mode(), Mode::Dorian);
        assert_eq!(key.tonic_index(), 9);
        assert_eq!(key.to_string(), "A Dor");
    }

    #[test]
    fn test_parse_flat_tonic() {
        let key = parse_key_line("[K:Ebmaj]").unwrap();
        assert_eq!(key.tonic(), "_E");
        assert_eq!(key.mode(), Mode::Major);

        let key = parse_key_line("[K:Bbmix]").unwrap();
        assert_eq!(key.tonic(), "_B");
        assert_eq!(key.mode(), Mode::Mixolydian);
    }

    #[test]
    fn test_parse_sharp_tonic_resolves_to_flat() {
        let key = parse_key_line("[K:F#min]").unwrap();
        assert_eq!(key.tonic(), "_G");
        assert_eq!(key.tonic_index(), 6);
        assert_eq!(key.mode(), Mode::Minor);
    }

    #[test]
    fn test_mode_codes_are_case_insensitive() {
        assert_eq!(parse_key_line("[K:DMix]").unwrap().mode(), Mode::Mixolydian);
        assert_eq!(parse_key_line("[K:Gmaj]").unwrap().mode(), Mode::Major);
        assert_eq!(parse_key_line("[K:ELOC]").unwrap().mode(), Mode::Locrian);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let key = parse_key_line("  [K:Cmaj]\r").unwrap();
        assert_eq!(key.tonic(), "C");
    }

    #[test]
    fn test_missing_marker_is_malformed() {
        let err = parse_key_line("K:Ador").unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedKey(_)));

        let err = parse_key_line("[M:4/4]").unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedKey(_)));
    }

    #[test]
    fn test_short_key_is_malformed() {
        assert!(matches!(parse_key_line("[K:]"), Err(NormalizeError::MalformedKey(_))));
        assert!(matches!(parse_key_line("[K:A]"), Err(NormalizeError::MalformedKey(_))));
        assert!(matches!(parse_key_line("[K:Ebm]"), Err(NormalizeError::MalformedKey(_))));
    }

    #[test]
    fn test_bad_tonic_is_malformed() {
        assert!(matches!(parse_key_line("[K:Hmaj]"), Err(NormalizeError::MalformedKey(_))));
        assert!(matches!(parse_key_line("[K:Cbmaj]"), Err(NormalizeError::MalformedKey(_))));
        assert!(matches!(parse_key_line("[K:E#min]"), Err(NormalizeError::MalformedKey(_))));
    }

    #[test]
    fn test_unknown_mode() {
        let err = parse_key_line("[K:Axyz]").unwrap_err();
        assert_eq!(err, NormalizeError::UnknownMode("xyz".to_string()));
    }

    #[test]
    fn test_every_mode_code_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_code(mode.code()), Some(mode));
        }
    }
}
