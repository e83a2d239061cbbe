//! CEI (employer registration): 10 base digits + 1 check digit.
//!
//! The CEI rule differs from the CPF family: the remainder is not floored
//! at zero. `r = sum % 11; if r == 0 { r = 11 }; digit = 11 - r`, and the
//! one value that computes to 10 (`r == 1`) collapses to 0 so the result
//! stays a single digit.

use crate::{digits_to_string, parse_digits, random_digits};
use rand::Rng;

const WEIGHTS: [u8; 10] = [7, 4, 1, 8, 5, 2, 1, 6, 3, 7];

/// Derive the CEI check digit from the 10 base digits.
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(&WEIGHTS)
        .map(|(d, w)| u32::from(*d) * u32::from(*w))
        .sum();
    let mut remainder = sum % 11;
    if remainder == 0 {
        remainder = 11;
    }
    ((11 - remainder) % 10) as u8
}

/// Generate a check-digit-valid CEI.
///
/// `formatted` renders the `NN.NNN.NNNNN/N` mask.
pub fn generate<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let mut digits = random_digits(rng, 10);
    digits.push(check_digit(&digits));
    let raw = digits_to_string(&digits);
    if formatted {
        format(&raw)
    } else {
        raw
    }
}

/// Apply the `NN.NNN.NNNNN/N` mask to an 11-digit CEI.
pub fn format(raw: &str) -> String {
    debug_assert!(raw.len() == 11 && raw.is_ascii(), "expected 11 digits, got {raw:?}");
    format!("{}.{}.{}/{}", &raw[..2], &raw[2..5], &raw[5..10], &raw[10..])
}

/// Check a CEI (formatted or raw) against its own check digit.
pub fn validate(value: &str) -> bool {
    let raw = crate::strip_punctuation(value);
    let Some(digits) = parse_digits(&raw) else {
        return false;
    };
    digits.len() == 11 && digits[10] == check_digit(&digits[..10])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_cei_round_trips() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let raw = generate(&mut rng, false);
            assert_eq!(raw.len(), 11);
            assert!(validate(&raw), "invalid CEI generated: {raw}");
        }
    }

    #[test]
    fn test_check_digit_zero_remainder_case() {
        // All zeros: sum = 0, remainder promoted to 11, digit = 0.
        assert_eq!(check_digit(&[0; 10]), 0);
    }

    #[test]
    fn test_check_digit_remainder_one_collapses() {
        // Weights 7 and 5 at indices 0 and 4: sum = 12, r = 1,
        // 11 - 1 = 10, collapsed to 0.
        assert_eq!(check_digit(&[1, 0, 0, 0, 1, 0, 0, 0, 0, 0]), 0);
    }

    #[test]
    fn test_check_digit_regular_case() {
        // Weight 4 at index 1: sum = 4, r = 4, digit = 7.
        assert_eq!(check_digit(&[0, 1, 0, 0, 0, 0, 0, 0, 0, 0]), 7);
    }

    #[test]
    fn test_formatted_shape_and_reversibility() {
        let mut rng = StdRng::seed_from_u64(7);

        let formatted = generate(&mut rng, true);
        assert_eq!(formatted.len(), 14);
        assert_eq!(&formatted[2..3], ".");
        assert_eq!(&formatted[6..7], ".");
        assert_eq!(&formatted[12..13], "/");

        let raw = crate::strip_punctuation(&formatted);
        assert_eq!(raw.len(), 11);
        assert_eq!(format(&raw), formatted);
        assert!(validate(&formatted));
    }
}
