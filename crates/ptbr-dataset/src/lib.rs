//! Population dataset model and validating loader for ptbr-faker.
//!
//! This crate defines the typed structure of the pre-merged Brazilian
//! population dataset (states, cities with CEP ranges, first names per
//! historical period, surnames, optional middle names) and a fail-closed
//! loader: a `PopulationDataset` that parsed and validated successfully is
//! the only way to construct the samplers in `ptbr-sampler`.
//!
//! # Example
//!
//! ```ignore
//! use ptbr_dataset::PopulationDataset;
//!
//! let dataset = PopulationDataset::from_file("br_pop_data_2024.json")?
//!     .with_middle_names_file("middle_names.json")?;
//! ```
//!
//! The dataset is immutable after load. Sampling never writes back.

pub mod error;
pub mod model;
pub mod period;

pub use error::DatasetError;
pub use model::{
    parse_cep, CityInfo, MiddleNameData, MiddleNameEntry, NameFrequency, PeriodNames,
    PopulationDataset, StateInfo, SurnameFrequency, SurnamesSection,
};
pub use period::TimePeriod;
