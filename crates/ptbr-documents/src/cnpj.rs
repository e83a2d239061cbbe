//! CNPJ (company taxpayer ID): 12 base digits + 2 check digits.

use crate::{check_digit, digits_to_string, parse_digits, random_digits};
use rand::Rng;

const WEIGHTS_FIRST: [u8; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const WEIGHTS_SECOND: [u8; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Generate a check-digit-valid CNPJ.
///
/// `formatted` renders the conventional `NN.NNN.NNN/NNNN-NN` mask.
pub fn generate<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let mut digits = random_digits(rng, 12);
    digits.push(check_digit(&digits, &WEIGHTS_FIRST));
    digits.push(check_digit(&digits, &WEIGHTS_SECOND));
    let raw = digits_to_string(&digits);
    if formatted {
        format(&raw)
    } else {
        raw
    }
}

/// Apply the `NN.NNN.NNN/NNNN-NN` mask to a 14-digit CNPJ.
pub fn format(raw: &str) -> String {
    debug_assert!(raw.len() == 14 && raw.is_ascii(), "expected 14 digits, got {raw:?}");
    format!(
        "{}.{}.{}/{}-{}",
        &raw[..2],
        &raw[2..5],
        &raw[5..8],
        &raw[8..12],
        &raw[12..]
    )
}

/// Check a CNPJ (formatted or raw) against its own check digits.
pub fn validate(value: &str) -> bool {
    let raw = crate::strip_punctuation(value);
    let Some(digits) = parse_digits(&raw) else {
        return false;
    };
    digits.len() == 14
        && digits[12] == check_digit(&digits[..12], &WEIGHTS_FIRST)
        && digits[13] == check_digit(&digits[..13], &WEIGHTS_SECOND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_cnpj_round_trips() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let raw = generate(&mut rng, false);
            assert_eq!(raw.len(), 14);
            assert!(validate(&raw), "invalid CNPJ generated: {raw}");
        }
    }

    #[test]
    fn test_formatted_shape_and_reversibility() {
        let mut rng = StdRng::seed_from_u64(7);

        let formatted = generate(&mut rng, true);
        assert_eq!(formatted.len(), 18);
        assert_eq!(&formatted[2..3], ".");
        assert_eq!(&formatted[6..7], ".");
        assert_eq!(&formatted[10..11], "/");
        assert_eq!(&formatted[15..16], "-");

        let raw = crate::strip_punctuation(&formatted);
        assert_eq!(format(&raw), formatted);
        assert!(validate(&formatted));
    }

    #[test]
    fn test_known_valid_cnpj() {
        // 11.222.333/0001-81 is a standard worked example.
        assert!(validate("11.222.333/0001-81"));
        assert!(!validate("11.222.333/0001-82"));
    }
}
