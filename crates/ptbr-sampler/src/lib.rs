//! Weighted samplers over the validated population dataset.
//!
//! Two samplers share the same pattern: construction takes an
//! `Arc<PopulationDataset>` plus an optional seed, precomputes a
//! `WeightedIndex` pool per distribution, and every sampling call is an
//! independent draw against those immutable pools.
//!
//! - [`NameSampler`] draws first names by historical period, surnames with
//!   probabilistic linking-preposition prefixes, and optional middle names.
//! - [`LocationSampler`] draws states, cities within states, CEPs within a
//!   city's postal range(s), and composed location strings.
//!
//! The samplers own a seeded `StdRng` each, so concurrent use means one
//! sampler instance per thread.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ptbr_dataset::PopulationDataset;
//! use ptbr_sampler::{LocationSampler, LocationOptions};
//!
//! let dataset = Arc::new(PopulationDataset::from_file("br_pop_data_2024.json")?);
//! let mut sampler = LocationSampler::new(dataset)?;
//! let line = sampler.sample_full_location(&LocationOptions::default())?;
//! println!("{line}");
//! ```

pub mod error;
pub mod location;
pub mod name;
mod pool;

pub use error::SamplerError;
pub use location::{LocationOptions, LocationSampler};
pub use name::{FullNameOptions, NameSampler};
