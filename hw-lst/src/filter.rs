//! Month and year filters applied to readings before calibration.

use crate::error::LstError;
use crate::reading::Reading;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A validated subset of calendar months (1-12).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct MonthSet(BTreeSet<u32>);

impl MonthSet {
    pub fn new(months: impl IntoIterator<Item = u32>) -> Result<Self, LstError> {
        let mut set = BTreeSet::new();
        for month in months {
            if !(1..=12).contains(&month) {
                return Err(LstError::InvalidMonth(month));
            }
            set.insert(month);
        }
        Ok(MonthSet(set))
    }

    /// Every month of the year.
    pub fn all() -> Self {
        MonthSet((1..=12).collect())
    }

    /// January through March, the dashboard's default selection.
    pub fn summer() -> Self {
        MonthSet((1..=3).collect())
    }

    pub fn contains(&self, month: u32) -> bool {
        self.0.contains(&month)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl Default for MonthSet {
    fn default() -> Self {
        MonthSet::summer()
    }
}

impl TryFrom<Vec<u32>> for MonthSet {
    type Error = LstError;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        MonthSet::new(value)
    }
}

impl From<MonthSet> for Vec<u32> {
    fn from(value: MonthSet) -> Self {
        value.0.into_iter().collect()
    }
}

/// Parses comma separated months and inclusive ranges, e.g. `1,2,3` or `11-12,1-3`.
impl FromStr for MonthSet {
    type Err = LstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| -> Result<u32, LstError> {
            part.trim()
                .parse::<u32>()
                .map_err(|_| LstError::InvalidMonth(0))
        };
        let mut months = Vec::new();
        for part in s.split(',').filter(|p| !p.trim().is_empty()) {
            match part.split_once('-') {
                Some((lo, hi)) => {
                    let (lo, hi) = (parse(lo)?, parse(hi)?);
                    if lo > hi {
                        return Err(LstError::InvalidMonth(lo));
                    }
                    months.extend(lo..=hi);
                }
                None => months.push(parse(part)?),
            }
        }
        MonthSet::new(months)
    }
}

impl fmt::Display for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "YearRangeFields")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct YearRangeFields {
    start: i32,
    end: i32,
}

impl TryFrom<YearRangeFields> for YearRange {
    type Error = LstError;

    fn try_from(value: YearRangeFields) -> Result<Self, Self::Error> {
        YearRange::new(value.start, value.end)
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, LstError> {
        if start > end {
            return Err(LstError::InvalidYearRange { start, end });
        }
        Ok(YearRange { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Parses `2001-2020` or a single year `2015`.
impl FromStr for YearRange {
    type Err = LstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| -> Result<i32, LstError> {
            part.trim()
                .parse::<i32>()
                .map_err(|_| LstError::InvalidYearRange { start: 0, end: 0 })
        };
        match s.trim().split_once('-') {
            Some((lo, hi)) => YearRange::new(parse(lo)?, parse(hi)?),
            None => {
                let year = parse(s)?;
                YearRange::new(year, year)
            }
        }
    }
}

/// Keep the readings whose month is selected and, when a year range is
/// given, whose year falls inside it.
pub fn filter_readings<'a>(
    readings: &'a [Reading],
    months: &'a MonthSet,
    years: Option<&'a YearRange>,
) -> impl Iterator<Item = &'a Reading> + 'a {
    readings.iter().filter(move |reading| {
        months.contains(reading.month())
            && years.map_or(true, |range| range.contains(reading.year()))
    })
}
