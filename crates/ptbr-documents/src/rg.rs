//! RG (state identity card): 8 base digits + 1 check character.
//!
//! The check character is the weighted sum modulo 11 itself, rendered as
//! `X` when it computes to 10, so RG is the one document whose check
//! position may be non-numeric.

use crate::{digits_to_string, parse_digits};
use rand::Rng;

const WEIGHTS: [u8; 8] = [2, 3, 4, 5, 6, 7, 8, 9];

/// Derive the RG check character from the 8 base digits.
pub fn check_char(digits: &[u8]) -> char {
    let sum: u32 = digits
        .iter()
        .zip(&WEIGHTS)
        .map(|(d, w)| u32::from(*d) * u32::from(*w))
        .sum();
    let remainder = sum % 11;
    if remainder == 10 {
        'X'
    } else {
        char::from(b'0' + remainder as u8)
    }
}

/// Generate a check-valid RG.
///
/// `formatted` renders the conventional `NN.NNN.NNN-C` mask.
pub fn generate<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let digits = crate::random_digits(rng, 8);
    let mut raw = digits_to_string(&digits);
    raw.push(check_char(&digits));
    if formatted {
        format(&raw)
    } else {
        raw
    }
}

/// Apply the `NN.NNN.NNN-C` mask to a 9-character RG.
pub fn format(raw: &str) -> String {
    debug_assert!(raw.len() == 9 && raw.is_ascii(), "expected 9 characters, got {raw:?}");
    format!("{}.{}.{}-{}", &raw[..2], &raw[2..5], &raw[5..8], &raw[8..])
}

/// Check an RG (formatted or raw) against its own check character.
pub fn validate(value: &str) -> bool {
    let raw = crate::strip_punctuation(value);
    // Multi-byte characters can never form a valid RG; the boundary check
    // also keeps the slices below from panicking on them.
    if raw.len() != 9 || !raw.is_char_boundary(8) {
        return false;
    }
    let Some(digits) = parse_digits(&raw[..8]) else {
        return false;
    };
    raw[8..].chars().next() == Some(check_char(&digits))
}
