//! # Scale Model
//!
//! Static pitch tables for the three octave registers of the corpus notation.
//!
//! ## Registers
//! ```text
//! Lower   C,  _D,  D,  _E,  E,  F,  _G,  G,  _A,  A,  _B,  B,
//! Middle  C   _D   D   _E   E   F   _G   G   _A   A   _B   B
//! Upper   c   _d   d   _e   e   f   _g   g   _a   a   _b   b
//! ```
//!
//! Every register holds exactly 12 steps starting at C, each spelled with its
//! canonical flat form. Stepping below index 0 of a register lands on index 11
//! of the register below, and stepping above index 11 lands on index 0 of the
//! register above.
//!
//! ## Enharmonics
//! Sharp spellings (`^C`, `^D`, `^F`, `^G`, `^A` and their lower/upper forms)
//! are aliases. [`to_flat`] resolves them to the flat spelling in the same
//! register before any arithmetic. Anything else, including `^E`, `^B`,
//! naturals, bar lines and durations, is returned untouched.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Number of chromatic steps in one register.
pub const REGISTER_LEN: usize = 12;

const LOWER: [&str; REGISTER_LEN] = [
    "C,", "_D,", "D,", "_E,", "E,", "F,", "_G,", "G,", "_A,", "A,", "_B,", "B,",
];

const MIDDLE: [&str; REGISTER_LEN] = [
    "C", "_D", "D", "_E", "E", "F", "_G", "G", "_A", "A", "_B", "B",
];

const UPPER: [&str; REGISTER_LEN] = [
    "c", "_d", "d", "_e", "e", "f", "_g", "g", "_a", "a", "_b", "b",
];

const LOWER_SHARPS: [(&str, &str); 5] = [
    ("^C,", "_D,"),
    ("^D,", "_E,"),
    ("^F,", "_G,"),
    ("^G,", "_A,"),
    ("^A,", "_B,"),
];

const MIDDLE_SHARPS: [(&str, &str); 5] = [
    ("^C", "_D"),
    ("^D", "_E"),
    ("^F", "_G"),
    ("^G", "_A"),
    ("^A", "_B"),
];

const UPPER_SHARPS: [(&str, &str); 5] = [
    ("^c", "_d"),
    ("^d", "_e"),
    ("^f", "_g"),
    ("^g", "_a"),
    ("^a", "_b"),
];

static SHARP_TO_FLAT: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    LOWER_SHARPS
        .iter()
        .chain(MIDDLE_SHARPS.iter())
        .chain(UPPER_SHARPS.iter())
        .copied()
        .collect()
});

static CANONICAL: LazyLock<HashMap<&'static str, PitchClass>> = LazyLock::new(|| {
    Register::ALL
        .iter()
        .flat_map(|&register| {
            register
                .scale()
                .iter()
                .enumerate()
                .map(move |(index, &token)| (token, PitchClass { register, index }))
        })
        .collect()
});

/// Octave band of the notation, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Register {
    Lower,
    Middle,
    Upper,
}

impl Register {
    pub const ALL: [Register; 3] = [Register::Lower, Register::Middle, Register::Upper];

    /// The 12 canonical tokens of this register, C first.
    pub fn scale(self) -> &'static [&'static str; REGISTER_LEN] {
        match self {
            Register::Lower => &LOWER,
            Register::Middle => &MIDDLE,
            Register::Upper => &UPPER,
        }
    }

    fn ordinal(self) -> i32 {
        match self {
            Register::Lower => 0,
            Register::Middle => 1,
            Register::Upper => 2,
        }
    }

    /// Register for an ordinal, clamped to the available bands.
    fn from_ordinal_clamped(ordinal: i32) -> Register {
        match ordinal {
            i32::MIN..=0 => Register::Lower,
            1 => Register::Middle,
            _ => Register::Upper,
        }
    }
}

/// One chromatic step inside one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass {
    pub register: Register,
    /// 0 = C, 11 = B
    pub index: usize,
}

impl PitchClass {
    /// Canonical flat-spelled token for this step.
    pub fn token(self) -> &'static str {
        self.register.scale()[self.index]
    }

    /// Look up a token that is already in canonical flat spelling.
    pub fn lookup(token: &str) -> Option<PitchClass> {
        CANONICAL.get(token).copied()
    }

    /// Look up any pitch token, resolving sharp spellings first.
    /// Returns `None` for tokens that are not pitches.
    pub fn from_token(token: &str) -> Option<PitchClass> {
        Self::lookup(to_flat(token))
    }

    /// Move by `semitones` (negative is down), crossing registers through the
    /// adjacency rule: below index 0 comes index 11 of the register below,
    /// above index 11 comes index 0 of the register above.
    ///
    /// Past the lower or upper register the pitch class is kept and the
    /// octave clamps, so `C,` one step down is `B,` and `C,` seven steps down
    /// is `F,` (5 semitones above where it started).
    pub fn offset(self, semitones: i32) -> PitchClass {
        let len = REGISTER_LEN as i32;
        let absolute = self.register.ordinal() * len + self.index as i32 + semitones;
        PitchClass {
            register: Register::from_ordinal_clamped(absolute.div_euclid(len)),
            index: absolute.rem_euclid(len) as usize,
        }
    }

    /// One semitone down.
    pub fn step_down(self) -> PitchClass {
        self.offset(-1)
    }

    /// One semitone up.
    pub fn step_up(self) -> PitchClass {
        self.offset(1)
    }
}

/// Resolve a sharp spelling to its flat equivalent in the same register.
/// Tokens without a sharp alias come back unchanged.
pub fn to_flat(token: &str) -> &str {
    SHARP_TO_FLAT.get(token).copied().unwrap_or(token)
}
