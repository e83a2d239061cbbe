//! PIS (social-insurance ID): 10 base digits + 1 check digit.

use crate::{check_digit, digits_to_string, parse_digits, random_digits};
use rand::Rng;

const WEIGHTS: [u8; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Generate a check-digit-valid PIS.
///
/// `formatted` renders the conventional `NNN.NNNNN.NN-N` mask.
pub fn generate<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let mut digits = random_digits(rng, 10);
    digits.push(check_digit(&digits, &WEIGHTS));
    let raw = digits_to_string(&digits);
    if formatted {
        format(&raw)
    } else {
        raw
    }
}

/// Apply the `NNN.NNNNN.NN-N` mask to an 11-digit PIS.
pub fn format(raw: &str) -> String {
    debug_assert!(raw.len() == 11 && raw.is_ascii(), "expected 11 digits, got {raw:?}");
    format!(
        "{}.{}.{}-{}",
        &raw[..3],
        &raw[3..8],
        &raw[8..10],
        &raw[10..]
    )
}

/// Check a PIS (formatted or raw) against its own check digit.
pub fn validate(value: &str) -> bool {
    let raw = crate::strip_punctuation(value);
    let Some(digits) = parse_digits(&raw) else {
        return false;
    };
    digits.len() == 11 && digits[10] == check_digit(&digits[..10], &WEIGHTS)
}
