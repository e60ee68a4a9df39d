use crate::error::LstError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The extremeness cutoffs the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Percentile {
    #[default]
    P90,
    P95,
    P97_5,
}

impl Percentile {
    pub const ALL: [Percentile; 3] = [Percentile::P90, Percentile::P95, Percentile::P97_5];

    /// The percentile as a number in 0..=100.
    pub fn as_f64(self) -> f64 {
        match self {
            Percentile::P90 => 90.0,
            Percentile::P95 => 95.0,
            Percentile::P97_5 => 97.5,
        }
    }

    /// The percentile as a fraction in 0..=1.
    pub fn fraction(self) -> f64 {
        self.as_f64() / 100.0
    }
}

impl TryFrom<f64> for Percentile {
    type Error = LstError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Percentile::ALL
            .into_iter()
            .find(|p| p.as_f64() == value)
            .ok_or_else(|| LstError::InvalidPercentile(value.to_string()))
    }
}

impl From<Percentile> for f64 {
    fn from(value: Percentile) -> Self {
        value.as_f64()
    }
}

impl FromStr for Percentile {
    type Err = LstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let value: f64 = trimmed
            .parse()
            .map_err(|_| LstError::InvalidPercentile(s.to_string()))?;
        Percentile::try_from(value)
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}
