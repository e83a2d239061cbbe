//! Synthetic Brazilian document number generators.
//!
//! One module per document type, each following the same pattern: draw N
//! random base digits, derive one or two check digits with a weighted-sum
//! modulo-11 rule, and optionally apply the conventional punctuation mask.
//! The check-digit derivations are public so callers (and tests) can
//! re-validate any generated value; formatting is a reversible string
//! transform, so stripping punctuation recovers the raw digit string.
//!
//! Every number produced here is statistically valid but fake.
//!
//! # Example
//!
//! ```ignore
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let cpf = ptbr_documents::cpf::generate(&mut rng, true);
//! assert!(ptbr_documents::cpf::validate(&cpf));
//! ```

pub mod cei;
pub mod cnpj;
pub mod cpf;
pub mod pis;
pub mod rg;

use rand::Rng;

/// Weighted-sum modulo-11 check digit shared by CPF, PIS, and CNPJ.
///
/// `r = sum(digit * weight) % 11; digit = 0 if r < 2 else 11 - r`.
pub fn check_digit(digits: &[u8], weights: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(d, w)| u32::from(*d) * u32::from(*w))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Remove the conventional punctuation (`.`, `-`, `/`) from a formatted
/// document, recovering the raw digit string.
pub fn strip_punctuation(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/'))
        .collect()
}

pub(crate) fn random_digits<R: Rng>(rng: &mut R, count: usize) -> Vec<u8> {
    (0..count).map(|_| rng.gen_range(0..=9)).collect()
}

pub(crate) fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

pub(crate) fn parse_digits(value: &str) -> Option<Vec<u8>> {
    value
        .bytes()
        .map(|b| b.is_ascii_digit().then_some(b - b'0'))
        .collect()
}
