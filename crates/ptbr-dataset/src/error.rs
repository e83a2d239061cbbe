//! Error type for dataset loading and validation.

/// Error type for dataset operations.
///
/// Every validation variant names the field or key that failed, so a load
/// failure points directly at the malformed part of the JSON.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Error reading a dataset file
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required dataset section is empty or absent
    #[error("Dataset section '{0}' is empty")]
    EmptySection(&'static str),

    /// A historical period is missing from `common_names_percentage`
    #[error("Missing data for time period: {0}")]
    MissingPeriod(&'static str),

    /// A period entry has no names to sample from
    #[error("No names for time period: {0}")]
    EmptyPeriod(&'static str),

    /// A weight is negative or not finite
    #[error("Invalid weight {value} for '{key}' in {section}")]
    InvalidWeight {
        section: &'static str,
        key: String,
        value: f64,
    },

    /// All weights in a distribution are zero, so it can never be sampled
    #[error("All weights are zero in {0}")]
    ZeroWeights(&'static str),

    /// A city references a state abbreviation that does not exist
    #[error("City '{city}' references unknown state: {state_abbr}")]
    UnknownStateForCity { city: String, state_abbr: String },

    /// A CEP bound is not an 8-digit numeric string
    #[error("Invalid CEP '{value}' for city '{city}'")]
    InvalidCep { city: String, value: String },

    /// A CEP range has start > end
    #[error("CEP range for city '{city}' is inverted: {start} > {end}")]
    InvertedCepRange {
        city: String,
        start: String,
        end: String,
    },

    /// A city declares only one bound of its second CEP range
    #[error("City '{0}' has an incomplete second CEP range")]
    IncompleteSecondCepRange(String),

    /// Middle-names percentage is outside [0, 100]
    #[error("Middle-names field '{field}' out of range: {value}")]
    InvalidPercentage { field: &'static str, value: f64 },
}
