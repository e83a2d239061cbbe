//! Location sampling: states, cities, CEPs, and composed location strings.

use crate::error::SamplerError;
use crate::name::{FullNameOptions, NameSampler};
use crate::pool::WeightedPool;
use ptbr_dataset::PopulationDataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Options for [`LocationSampler::sample_full_location`].
///
/// The `*_only` toggles short-circuit the composed output; the remaining
/// flags adjust the full `City, State (ABBR), CEP, Name` composition.
#[derive(Debug, Clone, Default)]
pub struct LocationOptions {
    /// Return only a city name
    pub city_only: bool,
    /// Return only a state abbreviation
    pub state_abbr_only: bool,
    /// Return only a full state name
    pub state_full_only: bool,
    /// Return only a CEP
    pub postal_only: bool,
    /// Return only surname(s)
    pub only_surname: bool,
    /// Return only a middle name
    pub only_middle: bool,
    /// Omit the CEP from the composed output
    pub without_postal: bool,
    /// Format CEPs without the dash
    pub postal_without_dash: bool,
    /// Render the state abbreviation without parentheses
    pub plain_abbr: bool,
    /// Omit the generated name from the composed output
    pub without_name: bool,
    /// Name-composition options, delegated to the name sampler
    pub name: FullNameOptions,
}

/// Weighted sampler for Brazilian locations.
///
/// State draws are weighted by renormalized national population share;
/// city draws by the city's share of its state. CEP draws are uniform over
/// the city's closed integer range(s). Owns a [`NameSampler`] for composed
/// location-plus-name output.
pub struct LocationSampler {
    states: WeightedPool<(String, String)>,
    cities_by_state: BTreeMap<String, WeightedPool<String>>,
    cep_ranges: BTreeMap<String, Vec<(u32, u32)>>,
    names: NameSampler,
    rng: StdRng,
}

impl LocationSampler {
    /// Create a sampler with an entropy-seeded rng.
    pub fn new(dataset: Arc<PopulationDataset>) -> Result<Self, SamplerError> {
        let names = NameSampler::new(Arc::clone(&dataset))?;
        Self::build(&dataset, names, StdRng::from_entropy())
    }

    /// Create a sampler with a fixed seed, for reproducible draws.
    pub fn with_seed(dataset: Arc<PopulationDataset>, seed: u64) -> Result<Self, SamplerError> {
        // Decorrelate the name sampler's stream from the location stream.
        let name_seed = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1);
        let names = NameSampler::with_seed(Arc::clone(&dataset), name_seed)?;
        Self::build(&dataset, names, StdRng::seed_from_u64(seed))
    }

    fn build(
        dataset: &PopulationDataset,
        names: NameSampler,
        rng: StdRng,
    ) -> Result<Self, SamplerError> {
        let states = WeightedPool::new(
            "states",
            dataset
                .states
                .iter()
                .map(|(name, info)| {
                    (
                        (name.clone(), info.state_abbr.clone()),
                        info.population_percentage,
                    )
                })
                .collect(),
        )?;

        let mut grouped: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
        let mut cep_ranges = BTreeMap::new();
        for (city_name, city) in &dataset.cities {
            grouped
                .entry(city.city_uf.clone())
                .or_default()
                .push((city_name.clone(), city.population_percentage_state));
            cep_ranges.insert(city_name.clone(), PopulationDataset::cep_ranges(city));
        }

        let mut cities_by_state = BTreeMap::new();
        for (state_abbr, entries) in grouped {
            let pool = WeightedPool::new(format!("cities of state {state_abbr}"), entries)?;
            cities_by_state.insert(state_abbr, pool);
        }

        tracing::debug!(
            states = dataset.states.len(),
            cities = dataset.cities.len(),
            "Location sampler ready"
        );

        Ok(Self {
            states,
            cities_by_state,
            cep_ranges,
            names,
            rng,
        })
    }

    /// Draw a state weighted by population share.
    ///
    /// Returns `(full name, abbreviation)`.
    pub fn sample_state(&mut self) -> (String, String) {
        self.states.sample(&mut self.rng).clone()
    }

    /// Draw a city, weighted by in-state population share.
    ///
    /// Draws a state first when `state_abbr` is `None`. Returns
    /// `(city name, state abbreviation)`.
    pub fn sample_city(
        &mut self,
        state_abbr: Option<&str>,
    ) -> Result<(String, String), SamplerError> {
        let abbr = match state_abbr {
            Some(abbr) => abbr.to_string(),
            None => self.sample_state().1,
        };
        let pool = self
            .cities_by_state
            .get(&abbr)
            .ok_or_else(|| SamplerError::NoCitiesForState(abbr.clone()))?;
        let city = pool.sample(&mut self.rng).clone();
        Ok((city, abbr))
    }

    /// Draw a state and a city within it.
    ///
    /// Returns `(state name, state abbreviation, city name)`.
    pub fn sample_state_and_city(&mut self) -> Result<(String, String, String), SamplerError> {
        let (state_name, state_abbr) = self.sample_state();
        let (city_name, _) = self.sample_city(Some(&state_abbr))?;
        Ok((state_name, state_abbr, city_name))
    }

    /// Draw a CEP uniformly within the city's range.
    ///
    /// Cities with a second disjoint range pick one of the two ranges 50/50
    /// before drawing. Output is 8 digits zero-padded, `NNNNN-NNN` when
    /// `with_dash`.
    pub fn sample_postal_code(
        &mut self,
        city_name: &str,
        with_dash: bool,
    ) -> Result<String, SamplerError> {
        let ranges = self
            .cep_ranges
            .get(city_name)
            .filter(|ranges| !ranges.is_empty())
            .ok_or_else(|| SamplerError::UnknownCity(city_name.to_string()))?;

        let (start, end) = if ranges.len() > 1 && self.rng.gen_bool(0.5) {
            ranges[1]
        } else {
            ranges[0]
        };
        let cep = self.rng.gen_range(start..=end);
        Ok(format_cep(cep, with_dash))
    }

    /// Compose a location string according to the options.
    ///
    /// Default shape: `City, State (ABBR), NNNNN-NNN, Full Name`.
    pub fn sample_full_location(
        &mut self,
        options: &LocationOptions,
    ) -> Result<String, SamplerError> {
        if options.only_middle {
            return self.names.sample_middle_name(options.name.raw);
        }
        if options.only_surname {
            return self.names.sample_surname(
                options.name.top_40,
                options.name.raw,
                options.name.single_surname,
            );
        }
        if options.postal_only {
            let (city, _) = self.sample_city(None)?;
            return self.sample_postal_code(&city, !options.postal_without_dash);
        }
        if options.state_abbr_only {
            return Ok(self.sample_state().1);
        }
        if options.state_full_only {
            return Ok(self.sample_state().0);
        }
        if options.city_only {
            return Ok(self.sample_city(None)?.0);
        }

        let (state_name, state_abbr, city_name) = self.sample_state_and_city()?;
        let base = if options.plain_abbr {
            format!("{city_name}, {state_name} {state_abbr}")
        } else {
            format!("{city_name}, {state_name} ({state_abbr})")
        };

        let mut parts = vec![base];
        if !options.without_postal {
            parts.push(self.sample_postal_code(&city_name, !options.postal_without_dash)?);
        }
        if !options.without_name {
            parts.push(self.names.sample_full_name(&options.name)?);
        }
        Ok(parts.join(", "))
    }
}

/// Format a numeric CEP as an 8-digit string, dashed as `NNNNN-NNN` when
/// requested.
fn format_cep(cep: u32, with_dash: bool) -> String {
    let digits = format!("{cep:08}");
    if with_dash {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}
