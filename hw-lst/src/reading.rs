use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single daily land-surface-temperature reading for one region.
///
/// This is the normalized record shape every loader produces; the
/// detection core never sees raw source columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub region_id: String,
    pub date: NaiveDate,
    /// Temperature in °C
    pub value: f64,
}

impl Reading {
    pub fn new(region_id: impl Into<String>, date: NaiveDate, value: f64) -> Self {
        Reading {
            region_id: region_id.into(),
            date,
            value,
        }
    }

    /// Calendar month (1-12) of the reading.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Calendar year of the reading.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Group a vector of readings by region_id.
    ///
    /// Regions come back in lexical order and each region keeps the
    /// relative order its readings had in the input.
    pub fn group_by_region(readings: Vec<Reading>) -> BTreeMap<String, Vec<Reading>> {
        let mut result: BTreeMap<String, Vec<Reading>> = BTreeMap::new();
        for reading in readings {
            result
                .entry(reading.region_id.clone())
                .or_default()
                .push(reading);
        }
        result
    }

    /// Sort readings by date ascending.
    ///
    /// The sort is stable, so duplicate dates keep their input order.
    pub fn sort_chronologically(readings: &mut [Reading]) {
        readings.sort_by_key(|reading| reading.date);
    }
}

#[cfg(test)]
mod tests {
    use super::Reading;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_group_by_region() {
        let readings = vec![
            Reading::new("Pajeú", day(2), 31.0),
            Reading::new("Moxotó", day(1), 30.0),
            Reading::new("Pajeú", day(1), 32.0),
        ];
        let grouped = Reading::group_by_region(readings);
        let keys: Vec<&String> = grouped.keys().collect();
        assert_eq!(keys, vec!["Moxotó", "Pajeú"]);
        assert_eq!(grouped["Pajeú"].len(), 2);
        // input order preserved within a region
        assert_eq!(grouped["Pajeú"][0].date, day(2));
    }

    #[test]
    fn test_sort_chronologically_is_stable() {
        let mut readings = vec![
            Reading::new("A", day(3), 1.0),
            Reading::new("A", day(1), 2.0),
            Reading::new("A", day(3), 3.0),
            Reading::new("A", day(2), 4.0),
        ];
        Reading::sort_chronologically(&mut readings);
        let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_month_and_year() {
        let reading = Reading::new("A", NaiveDate::from_ymd_opt(2021, 11, 5).unwrap(), 1.0);
        assert_eq!(reading.month(), 11);
        assert_eq!(reading.year(), 2021);
    }
}
