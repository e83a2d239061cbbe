//! Typed records for the population dataset and the validating loader.
//!
//! Field names mirror the dataset JSON keys (`city_uf`, `cep_starts`,
//! `population_percentage_state`, ...) so the structs deserialize directly
//! from the pre-merged data files. Validation runs once at load; a
//! `PopulationDataset` value that exists has passed every structural
//! invariant.

use crate::error::DatasetError;
use crate::period::TimePeriod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One state entry: abbreviation plus share of the national population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateInfo {
    /// Two-letter state abbreviation (e.g. "SP")
    pub state_abbr: String,

    /// Share of the national population, 0-100. Shares need not sum to
    /// exactly 100; samplers renormalize.
    pub population_percentage: f64,
}

/// One city entry: owning state, in-state population share, CEP range(s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    /// Abbreviation of the state this city belongs to
    pub city_uf: String,

    /// Share of the owning state's population, 0-100
    pub population_percentage_state: f64,

    /// Start of the city's CEP range, 8 digits (dash tolerated)
    pub cep_starts: String,

    /// End of the city's CEP range, 8 digits (dash tolerated)
    pub cep_ends: String,

    /// Start of a second disjoint CEP range, for cities with split ranges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_starts_two: Option<String>,

    /// End of the second CEP range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep_ends_two: Option<String>,
}

/// Per-name frequency within a time period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameFrequency {
    /// Percentage weight of this name within its period
    pub percentage: f64,
}

/// First-name distribution for one historical period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodNames {
    /// Total number of people counted for this period
    pub total: u64,

    /// Name (upper-case in the source data) -> frequency
    pub names: BTreeMap<String, NameFrequency>,
}

/// Per-surname frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurnameFrequency {
    /// Percentage weight of this surname
    pub percentage: f64,
}

/// The surnames section: the full weighted population plus the nested
/// `top_40` subset used when sampling is restricted to the most common
/// surnames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurnamesSection {
    /// Curated subset of the most frequent surnames
    #[serde(default)]
    pub top_40: BTreeMap<String, SurnameFrequency>,

    /// Every surname in the dataset (the `top_40` key is captured above,
    /// everything else lands here)
    #[serde(flatten)]
    pub all: BTreeMap<String, SurnameFrequency>,
}

/// One entry in the middle-names frequency list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddleNameEntry {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

/// Middle-names statistics, loaded from a separate JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddleNameData {
    pub total_people: u64,
    pub total_with_second_names: u64,

    /// Probability (0-100) that a generated full name includes a middle name
    pub percentage_with_second: f64,

    /// Ordered most-common middle names with frequency weights
    pub most_common: Vec<MiddleNameEntry>,
}

/// The complete population dataset consumed by the samplers.
///
/// Loaded once, immutable for the lifetime of a sampler. `middle_names` is
/// optional and attached separately via [`PopulationDataset::with_middle_names_file`];
/// operations that need it fail explicitly when it is absent.
///
/// Maps are `BTreeMap` so pool construction iterates in a stable order,
/// which keeps seeded sampling runs reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationDataset {
    /// State full name -> state info
    pub states: BTreeMap<String, StateInfo>,

    /// City name -> city info
    pub cities: BTreeMap<String, CityInfo>,

    /// Period key (`ate1930`..`ate2010`) -> first-name distribution
    pub common_names_percentage: BTreeMap<String, PeriodNames>,

    /// Surname distributions (full population + top-40 subset)
    pub surnames: SurnamesSection,

    /// Middle-names statistics, absent unless explicitly loaded
    #[serde(skip)]
    pub middle_names: Option<MiddleNameData>,
}

/// Parse a CEP string into its numeric value.
///
/// Accepts the conventional dashed form (`01000-000`) or the bare 8-digit
/// form; anything else is `None`.
pub fn parse_cep(cep: &str) -> Option<u32> {
    let digits: String = cep.chars().filter(|c| *c != '-').collect();
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl PopulationDataset {
    /// Load and validate a dataset from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json(&content)?;
        tracing::info!(
            states = dataset.states.len(),
            cities = dataset.cities.len(),
            surnames = dataset.surnames.all.len(),
            "Loaded population dataset from {:?}",
            path.as_ref()
        );
        Ok(dataset)
    }

    /// Parse and validate a dataset from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: PopulationDataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Attach middle-names data from a separate JSON file.
    pub fn with_middle_names_file(self, path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path.as_ref())?;
        let middle: MiddleNameData = serde_json::from_str(&content)?;
        self.with_middle_names(middle)
    }

    /// Attach already-parsed middle-names data.
    pub fn with_middle_names(mut self, middle: MiddleNameData) -> Result<Self, DatasetError> {
        validate_middle_names(&middle)?;
        self.middle_names = Some(middle);
        Ok(self)
    }

    /// The parsed CEP range(s) for a city, `(start, end)` inclusive.
    ///
    /// Only valid after load; the loader has already verified the bounds.
    pub fn cep_ranges(city: &CityInfo) -> Vec<(u32, u32)> {
        let mut ranges = Vec::with_capacity(2);
        if let (Some(start), Some(end)) = (parse_cep(&city.cep_starts), parse_cep(&city.cep_ends)) {
            ranges.push((start, end));
        }
        if let (Some(start_two), Some(end_two)) = (&city.cep_starts_two, &city.cep_ends_two) {
            if let (Some(start), Some(end)) = (parse_cep(start_two), parse_cep(end_two)) {
                ranges.push((start, end));
            }
        }
        ranges
    }

    /// Check every structural invariant; first violation wins.
    fn validate(&self) -> Result<(), DatasetError> {
        if self.states.is_empty() {
            return Err(DatasetError::EmptySection("states"));
        }
        if self.common_names_percentage.is_empty() {
            return Err(DatasetError::EmptySection("common_names_percentage"));
        }
        if self.surnames.all.is_empty() {
            return Err(DatasetError::EmptySection("surnames"));
        }

        validate_weights(
            "states",
            self.states
                .iter()
                .map(|(name, info)| (name.as_str(), info.population_percentage)),
        )?;

        // Every fixed period must be present with a usable distribution.
        for period in TimePeriod::ALL {
            let entry = self
                .common_names_percentage
                .get(period.key())
                .ok_or(DatasetError::MissingPeriod(period.key()))?;
            if entry.names.is_empty() {
                return Err(DatasetError::EmptyPeriod(period.key()));
            }
            validate_weights(
                "common_names_percentage",
                entry
                    .names
                    .iter()
                    .map(|(name, freq)| (name.as_str(), freq.percentage)),
            )?;
        }

        validate_weights(
            "surnames",
            self.surnames
                .all
                .iter()
                .map(|(name, freq)| (name.as_str(), freq.percentage)),
        )?;
        if !self.surnames.top_40.is_empty() {
            validate_weights(
                "surnames.top_40",
                self.surnames
                    .top_40
                    .iter()
                    .map(|(name, freq)| (name.as_str(), freq.percentage)),
            )?;
        }

        for (city_name, city) in &self.cities {
            if !self
                .states
                .values()
                .any(|state| state.state_abbr == city.city_uf)
            {
                return Err(DatasetError::UnknownStateForCity {
                    city: city_name.clone(),
                    state_abbr: city.city_uf.clone(),
                });
            }
            if city.population_percentage_state < 0.0
                || !city.population_percentage_state.is_finite()
            {
                return Err(DatasetError::InvalidWeight {
                    section: "cities",
                    key: city_name.clone(),
                    value: city.population_percentage_state,
                });
            }
            validate_cep_range(city_name, &city.cep_starts, &city.cep_ends)?;
            match (&city.cep_starts_two, &city.cep_ends_two) {
                (Some(start), Some(end)) => validate_cep_range(city_name, start, end)?,
                (None, None) => {}
                _ => {
                    return Err(DatasetError::IncompleteSecondCepRange(city_name.clone()));
                }
            }
        }

        if let Some(middle) = &self.middle_names {
            validate_middle_names(middle)?;
        }

        Ok(())
    }
}

fn validate_weights<'a>(
    section: &'static str,
    weights: impl Iterator<Item = (&'a str, f64)>,
) -> Result<(), DatasetError> {
    let mut sum = 0.0;
    for (key, weight) in weights {
        if weight < 0.0 || !weight.is_finite() {
            return Err(DatasetError::InvalidWeight {
                section,
                key: key.to_string(),
                value: weight,
            });
        }
        sum += weight;
    }
    if sum <= 0.0 {
        return Err(DatasetError::ZeroWeights(section));
    }
    Ok(())
}

fn validate_cep_range(city: &str, start: &str, end: &str) -> Result<(), DatasetError> {
    let start_num = parse_cep(start).ok_or_else(|| DatasetError::InvalidCep {
        city: city.to_string(),
        value: start.to_string(),
    })?;
    let end_num = parse_cep(end).ok_or_else(|| DatasetError::InvalidCep {
        city: city.to_string(),
        value: end.to_string(),
    })?;
    if start_num > end_num {
        return Err(DatasetError::InvertedCepRange {
            city: city.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

fn validate_middle_names(middle: &MiddleNameData) -> Result<(), DatasetError> {
    if middle.most_common.is_empty() {
        return Err(DatasetError::EmptySection("middle_names.most_common"));
    }
    if !(0.0..=100.0).contains(&middle.percentage_with_second) {
        return Err(DatasetError::InvalidPercentage {
            field: "percentage_with_second",
            value: middle.percentage_with_second,
        });
    }
    validate_weights(
        "middle_names.most_common",
        middle
            .most_common
            .iter()
            .map(|entry| (entry.name.as_str(), entry.percentage)),
    )
}
