//! Error type for sampler construction and sampling calls.

/// Error type for sampler operations.
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    /// A weighted distribution is empty or has an all-zero weight sum
    #[error("Cannot sample from degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// A middle-name operation was requested but no middle-names data was
    /// loaded into the dataset
    #[error("Middle-names data was not loaded; cannot sample middle names")]
    MiddleNamesUnavailable,

    /// A top-40 surname draw was requested but the dataset has no `top_40`
    /// subset
    #[error("Dataset has no top-40 surname subset")]
    Top40Unavailable,

    /// The requested state abbreviation has no associated cities
    #[error("No cities found for state: {0}")]
    NoCitiesForState(String),

    /// The requested city is not in the dataset
    #[error("Unknown city: {0}")]
    UnknownCity(String),
}
