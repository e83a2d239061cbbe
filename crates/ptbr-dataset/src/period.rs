//! Historical time periods available in the dataset.

use serde::{Deserialize, Serialize};

/// Time periods available in the dataset.
///
/// Each variant maps to a dataset key of the form `ateYYYY` ("up to YYYY"),
/// nine decades from 1930 to 2010 inclusive. The loader requires every
/// period to be present in `common_names_percentage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "ate1930")]
    Until1930,
    #[serde(rename = "ate1940")]
    Until1940,
    #[serde(rename = "ate1950")]
    Until1950,
    #[serde(rename = "ate1960")]
    Until1960,
    #[serde(rename = "ate1970")]
    Until1970,
    #[serde(rename = "ate1980")]
    Until1980,
    #[serde(rename = "ate1990")]
    Until1990,
    #[serde(rename = "ate2000")]
    Until2000,
    #[serde(rename = "ate2010")]
    Until2010,
}

impl TimePeriod {
    /// All periods, oldest to newest.
    pub const ALL: [TimePeriod; 9] = [
        TimePeriod::Until1930,
        TimePeriod::Until1940,
        TimePeriod::Until1950,
        TimePeriod::Until1960,
        TimePeriod::Until1970,
        TimePeriod::Until1980,
        TimePeriod::Until1990,
        TimePeriod::Until2000,
        TimePeriod::Until2010,
    ];

    /// The dataset key for this period.
    pub fn key(&self) -> &'static str {
        match self {
            TimePeriod::Until1930 => "ate1930",
            TimePeriod::Until1940 => "ate1940",
            TimePeriod::Until1950 => "ate1950",
            TimePeriod::Until1960 => "ate1960",
            TimePeriod::Until1970 => "ate1970",
            TimePeriod::Until1980 => "ate1980",
            TimePeriod::Until1990 => "ate1990",
            TimePeriod::Until2000 => "ate2000",
            TimePeriod::Until2010 => "ate2010",
        }
    }
}

impl Default for TimePeriod {
    fn default() -> Self {
        TimePeriod::Until2010
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::ALL
            .iter()
            .find(|p| p.key() == s)
            .copied()
            .ok_or_else(|| format!("unknown time period: {s} (expected ate1930..ate2010)"))
    }
}
