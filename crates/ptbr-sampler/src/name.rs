//! Name sampling: first names by period, surnames with prefix decoration,
//! optional middle names.

use crate::error::SamplerError;
use crate::pool::WeightedPool;
use ptbr_dataset::{PopulationDataset, TimePeriod};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Canonical per-surname prefix table.
///
/// Each entry lists `(preposition, probability)` options; one uniform draw
/// walks the cumulative weights, and the remaining probability mass leaves
/// the surname undecorated. Surname keys are upper-case, matching the
/// stored data.
const SURNAME_PREFIXES: &[(&str, &[(&str, f64)])] = &[
    ("SANTOS", &[("dos", 0.85), ("de", 0.05)]),
    ("SILVA", &[("da", 0.85)]),
    ("NASCIMENTO", &[("do", 0.90)]),
    ("COSTA", &[("da", 0.90)]),
    ("SOUZA", &[("de", 0.80)]),
    ("SOUSA", &[("de", 0.80)]),
    ("OLIVEIRA", &[("de", 0.80)]),
    ("JESUS", &[("de", 0.80)]),
    ("PEREIRA", &[("da", 0.60)]),
    ("FERREIRA", &[("da", 0.60)]),
    ("LIMA", &[("de", 0.60)]),
    ("CARVALHO", &[("de", 0.60)]),
    ("RIBEIRO", &[("do", 0.60)]),
];

/// Probability that a selected `da`/`do` pluralizes to `das`/`dos`.
const PLURAL_PREFIX_CHANCE: f64 = 0.08;

/// Probability that a selected `de` elides to `d'` before a vowel-initial
/// surname.
const ELISION_CHANCE: f64 = 0.70;

/// Options for [`NameSampler::sample_full_name`].
#[derive(Debug, Clone)]
pub struct FullNameOptions {
    /// Historical period the first name is drawn from
    pub period: TimePeriod,
    /// Preserve the stored (upper-case) casing instead of title case
    pub raw: bool,
    /// Append surname(s)
    pub include_surname: bool,
    /// Restrict surnames to the top-40 subset
    pub top_40: bool,
    /// Draw one surname instead of two
    pub single_surname: bool,
    /// Always include a middle name (requires middle-names data)
    pub force_middle: bool,
}

impl Default for FullNameOptions {
    fn default() -> Self {
        Self {
            period: TimePeriod::default(),
            raw: false,
            include_surname: true,
            top_40: false,
            single_surname: false,
            force_middle: false,
        }
    }
}

/// Weighted sampler for Brazilian names.
///
/// Stateless across calls apart from the owned rng: every call is an
/// independent draw against pools precomputed at construction.
pub struct NameSampler {
    /// One pool per `TimePeriod`, indexed by variant order
    first_names: Vec<WeightedPool<String>>,
    surnames: WeightedPool<String>,
    top_40: Option<WeightedPool<String>>,
    middle_names: Option<WeightedPool<String>>,
    /// Probability (0-1) that a full name carries a middle name
    middle_chance: f64,
    rng: StdRng,
}

impl NameSampler {
    /// Create a sampler with an entropy-seeded rng.
    pub fn new(dataset: Arc<PopulationDataset>) -> Result<Self, SamplerError> {
        Self::build(&dataset, StdRng::from_entropy())
    }

    /// Create a sampler with a fixed seed, for reproducible draws.
    pub fn with_seed(dataset: Arc<PopulationDataset>, seed: u64) -> Result<Self, SamplerError> {
        Self::build(&dataset, StdRng::seed_from_u64(seed))
    }

    fn build(dataset: &PopulationDataset, rng: StdRng) -> Result<Self, SamplerError> {
        let mut first_names = Vec::with_capacity(TimePeriod::ALL.len());
        for period in TimePeriod::ALL {
            let entry = dataset
                .common_names_percentage
                .get(period.key())
                .ok_or_else(|| {
                    SamplerError::DegenerateDistribution(format!(
                        "common_names_percentage.{period}"
                    ))
                })?;
            first_names.push(WeightedPool::new(
                format!("common_names_percentage.{period}"),
                entry
                    .names
                    .iter()
                    .map(|(name, freq)| (name.clone(), freq.percentage))
                    .collect(),
            )?);
        }

        let surnames = WeightedPool::new(
            "surnames",
            dataset
                .surnames
                .all
                .iter()
                .map(|(name, freq)| (name.clone(), freq.percentage))
                .collect(),
        )?;

        let top_40 = if dataset.surnames.top_40.is_empty() {
            None
        } else {
            Some(WeightedPool::new(
                "surnames.top_40",
                dataset
                    .surnames
                    .top_40
                    .iter()
                    .map(|(name, freq)| (name.clone(), freq.percentage))
                    .collect(),
            )?)
        };

        let (middle_names, middle_chance) = match &dataset.middle_names {
            Some(middle) => {
                let pool = WeightedPool::new(
                    "middle_names.most_common",
                    middle
                        .most_common
                        .iter()
                        .map(|entry| (entry.name.clone(), entry.percentage))
                        .collect(),
                )?;
                (Some(pool), middle.percentage_with_second / 100.0)
            }
            None => (None, 0.0),
        };

        Ok(Self {
            first_names,
            surnames,
            top_40,
            middle_names,
            middle_chance,
            rng,
        })
    }

    /// Draw one first name from the given period's distribution.
    ///
    /// Zero-weight names stay in the population but are never drawn.
    pub fn sample_first_name(&mut self, period: TimePeriod, raw: bool) -> String {
        let name = self.first_names[period as usize].sample(&mut self.rng).clone();
        if raw {
            name
        } else {
            title_case(&name)
        }
    }

    /// Draw surname(s): two independent draws joined by a space by default,
    /// one when `single`. Each draw passes through probabilistic prefix
    /// decoration.
    pub fn sample_surname(
        &mut self,
        top_40: bool,
        raw: bool,
        single: bool,
    ) -> Result<String, SamplerError> {
        let first = self.draw_surname(top_40, raw)?;
        if single {
            return Ok(first);
        }
        let second = self.draw_surname(top_40, raw)?;
        Ok(format!("{first} {second}"))
    }

    /// Draw one middle name from the frequency list.
    ///
    /// Fails with [`SamplerError::MiddleNamesUnavailable`] when the dataset
    /// was loaded without middle-names data.
    pub fn sample_middle_name(&mut self, raw: bool) -> Result<String, SamplerError> {
        let pool = self
            .middle_names
            .as_ref()
            .ok_or(SamplerError::MiddleNamesUnavailable)?;
        let name = pool.sample(&mut self.rng).clone();
        Ok(if raw { name } else { title_case(&name) })
    }

    /// Compose first name, optional middle name, and surname(s), joined by
    /// single spaces in first -> middle -> surname order.
    pub fn sample_full_name(&mut self, options: &FullNameOptions) -> Result<String, SamplerError> {
        let mut name = self.sample_first_name(options.period, options.raw);

        let add_middle = if options.force_middle {
            if self.middle_names.is_none() {
                return Err(SamplerError::MiddleNamesUnavailable);
            }
            true
        } else {
            self.middle_names.is_some() && self.rng.gen::<f64>() < self.middle_chance
        };
        if add_middle {
            let middle = self.sample_middle_name(options.raw)?;
            name.push(' ');
            name.push_str(&middle);
        }

        if options.include_surname {
            let surname = self.sample_surname(options.top_40, options.raw, options.single_surname)?;
            name.push(' ');
            name.push_str(&surname);
        }

        Ok(name)
    }

    fn draw_surname(&mut self, top_40: bool, raw: bool) -> Result<String, SamplerError> {
        let pool = if top_40 {
            self.top_40.as_ref().ok_or(SamplerError::Top40Unavailable)?
        } else {
            &self.surnames
        };
        let surname = pool.sample(&mut self.rng).clone();
        let surname = if raw { surname } else { title_case(&surname) };
        Ok(apply_prefix(&surname, &mut self.rng))
    }
}

/// Decorate a surname with a linking preposition according to the canonical
/// prefix table. Casing follows the input: upper-case surnames get
/// upper-case prepositions.
fn apply_prefix<R: Rng>(surname: &str, rng: &mut R) -> String {
    let upper = surname.to_uppercase();
    let is_raw = surname == upper;

    let Some((_, options)) = SURNAME_PREFIXES.iter().find(|(key, _)| *key == upper) else {
        return surname.to_string();
    };

    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (prefix, weight) in options.iter() {
        cumulative += weight;
        if roll < cumulative {
            let mut prefix = (*prefix).to_string();
            if (prefix == "da" || prefix == "do") && rng.gen::<f64>() < PLURAL_PREFIX_CHANCE {
                prefix.push('s');
            } else if prefix == "de"
                && upper.starts_with(['A', 'E', 'I', 'O', 'U'])
                && rng.gen::<f64>() < ELISION_CHANCE
            {
                prefix = "d'".to_string();
            }
            let prefix = if is_raw { prefix.to_uppercase() } else { prefix };
            return if prefix.ends_with('\'') {
                format!("{prefix}{surname}")
            } else {
                format!("{prefix} {surname}")
            };
        }
    }

    surname.to_string()
}

/// Render an upper-case source name in title case, word by word.
fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptbr_dataset::{
        MiddleNameData, MiddleNameEntry, NameFrequency, PeriodNames, PopulationDataset,
        SurnameFrequency, SurnamesSection,
    };
    use std::collections::BTreeMap;

    fn names(entries: &[(&str, f64)]) -> BTreeMap<String, NameFrequency> {
        entries
            .iter()
            .map(|(name, pct)| (name.to_string(), NameFrequency { percentage: *pct }))
            .collect()
    }

    fn surname_map(entries: &[(&str, f64)]) -> BTreeMap<String, SurnameFrequency> {
        entries
            .iter()
            .map(|(name, pct)| (name.to_string(), SurnameFrequency { percentage: *pct }))
            .collect()
    }

    fn dataset(surnames: &[(&str, f64)], top_40: &[(&str, f64)]) -> Arc<PopulationDataset> {
        let mut periods = BTreeMap::new();
        for period in TimePeriod::ALL {
            periods.insert(
                period.key().to_string(),
                PeriodNames {
                    total: 1000,
                    names: names(&[("MARIA", 10.0), ("JOSE", 5.0), ("ZELDA", 0.0)]),
                },
            );
        }
        Arc::new(PopulationDataset {
            states: BTreeMap::new(),
            cities: BTreeMap::new(),
            common_names_percentage: periods,
            surnames: SurnamesSection {
                top_40: surname_map(top_40),
                all: surname_map(surnames),
            },
            middle_names: None,
        })
    }

    fn with_middle(dataset: Arc<PopulationDataset>, percentage_with_second: f64) -> Arc<PopulationDataset> {
        let mut inner = (*dataset).clone();
        inner.middle_names = Some(MiddleNameData {
            total_people: 1000,
            total_with_second_names: 400,
            percentage_with_second,
            most_common: vec![MiddleNameEntry {
                name: "APARECIDA".to_string(),
                count: 400,
                percentage: 40.0,
            }],
        });
        Arc::new(inner)
    }

    #[test]
    fn test_first_name_title_and_raw_casing() {
        let dataset = dataset(&[("MOREIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 42).unwrap();

        let titled = sampler.sample_first_name(TimePeriod::Until2010, false);
        assert!(["Maria", "Jose"].contains(&titled.as_str()));

        let raw = sampler.sample_first_name(TimePeriod::Until2010, true);
        assert!(["MARIA", "JOSE"].contains(&raw.as_str()));
    }

    #[test]
    fn test_zero_weight_name_is_unreachable() {
        let dataset = dataset(&[("MOREIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 1).unwrap();

        for _ in 0..500 {
            let name = sampler.sample_first_name(TimePeriod::Until1930, true);
            assert_ne!(name, "ZELDA");
        }
    }

    #[test]
    fn test_surname_double_has_two_draws_single_has_one() {
        // MOREIRA is not in the prefix table, so tokens map 1:1 to draws.
        let dataset = dataset(&[("MOREIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 42).unwrap();

        let double = sampler.sample_surname(false, false, false).unwrap();
        assert_eq!(double, "Moreira Moreira");

        let single = sampler.sample_surname(false, false, true).unwrap();
        assert_eq!(single, "Moreira");
    }

    #[test]
    fn test_prefix_decoration_produces_both_forms() {
        let dataset = dataset(&[("SANTOS", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 42).unwrap();

        let mut decorated = 0;
        let mut plain = 0;
        for _ in 0..300 {
            let surname = sampler.sample_surname(false, false, true).unwrap();
            match surname.as_str() {
                "Santos" => plain += 1,
                "dos Santos" | "de Santos" => decorated += 1,
                other => panic!("unexpected surname form: {other}"),
            }
        }
        assert!(decorated > 0, "prefix never applied");
        assert!(plain > 0, "prefix always applied");
    }

    #[test]
    fn test_raw_surname_gets_raw_prefix() {
        let dataset = dataset(&[("NASCIMENTO", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 9).unwrap();

        for _ in 0..100 {
            let surname = sampler.sample_surname(false, true, true).unwrap();
            assert!(
                ["NASCIMENTO", "DO NASCIMENTO", "DOS NASCIMENTO"].contains(&surname.as_str()),
                "unexpected form: {surname}"
            );
        }
    }

    #[test]
    fn test_vowel_elision_form() {
        let dataset = dataset(&[("OLIVEIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 3).unwrap();

        let mut saw_elision = false;
        for _ in 0..300 {
            let surname = sampler.sample_surname(false, false, true).unwrap();
            assert!(
                ["Oliveira", "de Oliveira", "d'Oliveira"].contains(&surname.as_str()),
                "unexpected form: {surname}"
            );
            if surname == "d'Oliveira" {
                saw_elision = true;
            }
        }
        assert!(saw_elision, "d' elision never produced");
    }

    #[test]
    fn test_top_40_restricts_population() {
        let dataset = dataset(&[("MOREIRA", 1.0), ("TAVARES", 1.0)], &[("TAVARES", 1.0)]);
        let mut sampler = NameSampler::with_seed(dataset, 5).unwrap();

        for _ in 0..100 {
            let surname = sampler.sample_surname(true, false, true).unwrap();
            assert_eq!(surname, "Tavares");
        }
    }

    #[test]
    fn test_top_40_unavailable_errors() {
        let dataset = dataset(&[("MOREIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 5).unwrap();

        let err = sampler.sample_surname(true, false, true).unwrap_err();
        assert!(matches!(err, SamplerError::Top40Unavailable));
    }

    #[test]
    fn test_middle_name_requires_data() {
        let dataset = dataset(&[("MOREIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 5).unwrap();

        let err = sampler.sample_middle_name(false).unwrap_err();
        assert!(matches!(err, SamplerError::MiddleNamesUnavailable));

        let options = FullNameOptions {
            force_middle: true,
            ..FullNameOptions::default()
        };
        let err = sampler.sample_full_name(&options).unwrap_err();
        assert!(matches!(err, SamplerError::MiddleNamesUnavailable));
    }

    #[test]
    fn test_full_name_with_forced_middle() {
        let dataset = with_middle(dataset(&[("MOREIRA", 1.0)], &[]), 0.0);
        let mut sampler = NameSampler::with_seed(dataset, 42).unwrap();

        let options = FullNameOptions {
            force_middle: true,
            single_surname: true,
            ..FullNameOptions::default()
        };
        let name = sampler.sample_full_name(&options).unwrap();
        let tokens: Vec<&str> = name.split(' ').collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], "Aparecida");
        assert_eq!(tokens[2], "Moreira");
    }

    #[test]
    fn test_full_name_middle_probability_zero_never_appears() {
        let dataset = with_middle(dataset(&[("MOREIRA", 1.0)], &[]), 0.0);
        let mut sampler = NameSampler::with_seed(dataset, 42).unwrap();

        for _ in 0..200 {
            let name = sampler
                .sample_full_name(&FullNameOptions {
                    single_surname: true,
                    ..FullNameOptions::default()
                })
                .unwrap();
            assert_eq!(name.split(' ').count(), 2, "unexpected middle in {name}");
        }
    }

    #[test]
    fn test_full_name_middle_probability_hundred_always_appears() {
        let dataset = with_middle(dataset(&[("MOREIRA", 1.0)], &[]), 100.0);
        let mut sampler = NameSampler::with_seed(dataset, 42).unwrap();

        for _ in 0..200 {
            let name = sampler
                .sample_full_name(&FullNameOptions {
                    single_surname: true,
                    ..FullNameOptions::default()
                })
                .unwrap();
            assert_eq!(name.split(' ').count(), 3, "missing middle in {name}");
        }
    }

    #[test]
    fn test_full_name_without_surname() {
        let dataset = dataset(&[("MOREIRA", 1.0)], &[]);
        let mut sampler = NameSampler::with_seed(dataset, 11).unwrap();

        let name = sampler
            .sample_full_name(&FullNameOptions {
                include_surname: false,
                ..FullNameOptions::default()
            })
            .unwrap();
        assert!(["Maria", "Jose"].contains(&name.as_str()));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("MARIA JOSE"), "Maria Jose");
        assert_eq!(title_case("JOÃO"), "João");
        assert_eq!(title_case("maria"), "Maria");
    }
}
