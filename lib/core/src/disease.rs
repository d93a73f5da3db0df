use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of diagnosis labels.
///
/// Declaration order is the tie-break order: when two classes end up with
/// the same final score, the first declared one wins. Serialized names keep
/// the original casing of the reference dataset, so `FungalInfections`
/// round-trips as `"Fungal_infections"` and `Ringworm` as `"ringworm"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disease {
    Dermatitis,
    #[serde(rename = "Fungal_infections")]
    FungalInfections,
    Healthy,
    Hypersensitivity,
    #[serde(rename = "demodicosis")]
    Demodicosis,
    #[serde(rename = "ringworm")]
    Ringworm,
}

impl Disease {
    pub const COUNT: usize = 6;

    /// All labels in declaration (tie-break) order.
    pub const ALL: [Disease; Self::COUNT] = [
        Disease::Dermatitis,
        Disease::FungalInfections,
        Disease::Healthy,
        Disease::Hypersensitivity,
        Disease::Demodicosis,
        Disease::Ringworm,
    ];

    /// The dataset label string for this disease.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::Dermatitis => "Dermatitis",
            Disease::FungalInfections => "Fungal_infections",
            Disease::Healthy => "Healthy",
            Disease::Hypersensitivity => "Hypersensitivity",
            Disease::Demodicosis => "demodicosis",
            Disease::Ringworm => "ringworm",
        }
    }

    /// Index into per-class arrays such as `ScoreMap`.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disease {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::UnknownLabel(s.to_string()))
    }
}
