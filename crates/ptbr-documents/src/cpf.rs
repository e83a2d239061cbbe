//! CPF (natural-person taxpayer ID): 9 base digits + 2 check digits.

use crate::{check_digit, digits_to_string, parse_digits, random_digits};
use rand::Rng;

const WEIGHTS_FIRST: [u8; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const WEIGHTS_SECOND: [u8; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Generate a check-digit-valid CPF.
///
/// `formatted` renders the conventional `NNN.NNN.NNN-NN` mask.
pub fn generate<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let mut digits = random_digits(rng, 9);
    digits.push(check_digit(&digits, &WEIGHTS_FIRST));
    digits.push(check_digit(&digits, &WEIGHTS_SECOND));
    let raw = digits_to_string(&digits);
    if formatted {
        format(&raw)
    } else {
        raw
    }
}

/// Apply the `NNN.NNN.NNN-NN` mask to an 11-digit CPF.
pub fn format(raw: &str) -> String {
    debug_assert!(raw.len() == 11 && raw.is_ascii(), "expected 11 digits, got {raw:?}");
    format!(
        "{}.{}.{}-{}",
        &raw[..3],
        &raw[3..6],
        &raw[6..9],
        &raw[9..]
    )
}

/// Check a CPF (formatted or raw) against its own check digits.
pub fn validate(value: &str) -> bool {
    let raw = crate::strip_punctuation(value);
    let Some(digits) = parse_digits(&raw) else {
        return false;
    };
    digits.len() == 11
        && digits[9] == check_digit(&digits[..9], &WEIGHTS_FIRST)
        && digits[10] == check_digit(&digits[..10], &WEIGHTS_SECOND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_cpf_round_trips() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let raw = generate(&mut rng, false);
            assert_eq!(raw.len(), 11);
            assert!(validate(&raw), "invalid CPF generated: {raw}");
        }
    }

    #[test]
    fn test_formatted_shape_and_reversibility() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let formatted = generate(&mut rng, true);
            assert_eq!(formatted.len(), 14);
            assert_eq!(&formatted[3..4], ".");
            assert_eq!(&formatted[7..8], ".");
            assert_eq!(&formatted[11..12], "-");
            assert!(validate(&formatted));

            let raw = crate::strip_punctuation(&formatted);
            assert_eq!(format(&raw), formatted);
        }
    }

    #[test]
    fn test_corrupted_check_digit_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let raw = generate(&mut rng, false);

        let mut bytes = raw.into_bytes();
        bytes[10] = if bytes[10] == b'9' { b'0' } else { bytes[10] + 1 };
        let corrupted = String::from_utf8(bytes).unwrap();
        assert!(!validate(&corrupted));
    }

    #[test]
    #[should_panic(expected = "expected 11 digits")]
    fn test_format_rejects_short_input() {
        format("12345");
    }

    #[test]
    fn test_known_valid_cpf() {
        // 529.982.247-25 is the classic check-digit worked example.
        assert!(validate("529.982.247-25"));
        assert!(validate("52998224725"));
        assert!(!validate("52998224726"));
    }
}
