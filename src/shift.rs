//! # Shift Calculator
//!
//! Turns a [`Key`] into the number of semitones every note of the tune moves
//! down so that its major-equivalent tonic lands on C.
//!
//! The distance is `tonic index + mode offset` and is deliberately left
//! unreduced: `[K:Amin]` gives 9 + 3 = 12, a full octave down, not 0. Octave
//! wraparound is the transposer's job.

use std::fmt;

use crate::key::Key;

/// Signed chromatic distance. Positive values shift pitches down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ShiftDistance(pub i32);

impl ShiftDistance {
    pub const ZERO: ShiftDistance = ShiftDistance(0);

    pub fn semitones(self) -> i32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ShiftDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} semitones", self.0)
    }
}

/// Distance from the key's tonic down to the C that its major equivalent maps onto.
pub fn shift_for_key(key: &Key) -> ShiftDistance {
    let index = key.tonic_index() as i32;
    ShiftDistance(index + key.mode().major_offset())
}
