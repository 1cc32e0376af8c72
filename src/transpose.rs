use crate::scale::{to_flat, PitchClass};
use crate::shift::ShiftDistance;

/// Move a pitch down by `shift` semitones.
///
/// When the shift is larger than the pitch's index the note borrows the
/// remainder from the register below: index 1 shifted down by 5 reaches C,
/// crosses to B of the lower register and moves 3 more steps from there,
/// landing on `_A,`. Reading position `len - 1 - (shift - index)` instead would
/// land one step lower (`G,`), since it skips the crossing step itself.
///
/// Below the lower register the octave clamps and the pitch class is kept, so
/// `C,` and `C` shifted down 7 both become `F,`. Melodic contour is not
/// preserved for notes pushed out of the lower register.
fn shift_pitch(pitch: PitchClass, shift: ShiftDistance) -> PitchClass {
    pitch.offset(-shift.semitones())
}

/// Transpose a single body token down by `shift` semitones.
///
/// Sharp spellings are normalized to flats first. Tokens that are not pitches
/// (bar lines, rests, durations, decorations) come back unchanged.
pub fn transpose_token(token: &str, shift: ShiftDistance) -> &str {
    match PitchClass::from_token(token) {
        Some(pitch) => shift_pitch(pitch, shift).token(),
        None => token,
    }
}

/// Transpose every whitespace-separated token of a note-body line.
///
/// A zero shift returns the body exactly as given. Otherwise the rewritten
/// tokens are joined with single spaces.
pub fn transpose_body(body: &str, shift: ShiftDistance) -> String {
    if shift.is_zero() {
        return body.to_string();
    }

    body.split_whitespace()
        .map(|token| transpose_token(to_flat(token), shift))
        .collect::<Vec<_>>()
        .join(" ")
}
