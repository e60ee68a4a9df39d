//! Percentile threshold calibration.

use hw_lst::error::{LstError, Result};
use hw_lst::percentile::Percentile;
use hw_lst::reading::Reading;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Value at `percentile` of `values`, interpolating linearly between the
/// two nearest order statistics.
///
/// With `n` sorted values and `p` in 0..=1 the position is
/// `h = (n - 1) * p`, and the result
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
///
/// # Errors
///
/// [`LstError::EmptyInput`] when `values` is empty and
/// [`LstError::NonFiniteValue`] when it contains NaN or infinities.
pub fn compute_threshold(values: &[f64], percentile: Percentile) -> Result<f64> {
    if values.is_empty() {
        return Err(LstError::EmptyInput);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(LstError::NonFiniteValue);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(quantile_linear(&sorted, percentile.fraction()))
}

/// Linear-interpolation quantile of pre-sorted, non-empty data.
fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Which readings a threshold is calibrated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalibrationScope {
    /// One threshold over every filtered reading of every region.
    Global,
    /// One threshold per region over that region's filtered readings.
    #[default]
    PerRegion,
    /// One threshold per region and calendar month.
    PerRegionMonth,
}

impl FromStr for CalibrationScope {
    type Err = LstError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "global" => Ok(CalibrationScope::Global),
            "per-region" => Ok(CalibrationScope::PerRegion),
            "per-region-month" => Ok(CalibrationScope::PerRegionMonth),
            other => Err(LstError::InvalidOption {
                option: "calibration scope",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CalibrationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalibrationScope::Global => "global",
            CalibrationScope::PerRegion => "per-region",
            CalibrationScope::PerRegionMonth => "per-region-month",
        };
        f.write_str(name)
    }
}

/// The threshold(s) that apply to one region's readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegionThreshold {
    Single(f64),
    /// Keyed by calendar month (1-12).
    Monthly(BTreeMap<u32, f64>),
}

impl RegionThreshold {
    /// Calibrate the threshold of one region.
    ///
    /// `global` must hold the pooled threshold when `scope` is
    /// [`CalibrationScope::Global`]; it is ignored otherwise.
    pub fn calibrate(
        series: &[Reading],
        percentile: Percentile,
        scope: CalibrationScope,
        global: Option<f64>,
    ) -> Result<Self> {
        match scope {
            CalibrationScope::Global => global
                .map(RegionThreshold::Single)
                .ok_or(LstError::EmptyInput),
            CalibrationScope::PerRegion => {
                let values: Vec<f64> = series.iter().map(|r| r.value).collect();
                Ok(RegionThreshold::Single(compute_threshold(&values, percentile)?))
            }
            CalibrationScope::PerRegionMonth => {
                let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
                for reading in series {
                    by_month.entry(reading.month()).or_default().push(reading.value);
                }
                if by_month.is_empty() {
                    return Err(LstError::EmptyInput);
                }
                let mut thresholds = BTreeMap::new();
                for (month, values) in by_month {
                    thresholds.insert(month, compute_threshold(&values, percentile)?);
                }
                Ok(RegionThreshold::Monthly(thresholds))
            }
        }
    }

    /// Threshold a reading is tested against.
    ///
    /// A month without a calibrated threshold yields `f64::INFINITY`, so
    /// such a reading never qualifies.
    pub fn value_for(&self, reading: &Reading) -> f64 {
        match self {
            RegionThreshold::Single(value) => *value,
            RegionThreshold::Monthly(by_month) => by_month
                .get(&reading.month())
                .copied()
                .unwrap_or(f64::INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_interpolates_between_order_statistics() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        // h = 9 * 0.9 = 8.1 -> 9 + 0.1 * (10 - 9)
        assert_close(compute_threshold(&values, Percentile::P90).unwrap(), 9.1);
        // h = 9 * 0.95 = 8.55
        assert_close(compute_threshold(&values, Percentile::P95).unwrap(), 9.55);
        // h = 9 * 0.975 = 8.775
        assert_close(compute_threshold(&values, Percentile::P97_5).unwrap(), 9.775);
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let a = [31.0, 29.5, 35.2, 33.3, 30.1];
        let b = [35.2, 30.1, 31.0, 33.3, 29.5];
        assert_eq!(
            compute_threshold(&a, Percentile::P95).unwrap(),
            compute_threshold(&b, Percentile::P95).unwrap()
        );
    }

    #[test]
    fn test_percentiles_are_monotonic() {
        let values = [
            28.1, 35.6, 30.2, 30.2, 41.0, 29.9, 33.3, 36.7, 31.5, 27.0, 38.8, 32.2, 34.4,
        ];
        let p90 = compute_threshold(&values, Percentile::P90).unwrap();
        let p95 = compute_threshold(&values, Percentile::P95).unwrap();
        let p975 = compute_threshold(&values, Percentile::P97_5).unwrap();
        assert!(p975 >= p95);
        assert!(p95 >= p90);
    }

    #[test]
    fn test_single_value() {
        assert_close(compute_threshold(&[33.0], Percentile::P97_5).unwrap(), 33.0);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            compute_threshold(&[], Percentile::P90),
            Err(LstError::EmptyInput)
        ));
    }

    #[test]
    fn test_non_finite_input_is_an_error() {
        assert!(matches!(
            compute_threshold(&[30.0, f64::NAN], Percentile::P90),
            Err(LstError::NonFiniteValue)
        ));
        assert!(matches!(
            compute_threshold(&[f64::INFINITY], Percentile::P90),
            Err(LstError::NonFiniteValue)
        ));
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("global".parse::<CalibrationScope>().unwrap(), CalibrationScope::Global);
        assert_eq!(
            "per-region-month".parse::<CalibrationScope>().unwrap(),
            CalibrationScope::PerRegionMonth
        );
        assert!("per-state".parse::<CalibrationScope>().is_err());
        assert_eq!(CalibrationScope::PerRegion.to_string(), "per-region");
    }

    #[test]
    fn test_per_region_month_thresholds() {
        let jan = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
        let feb = |d| NaiveDate::from_ymd_opt(2020, 2, d).unwrap();
        let series = vec![
            Reading::new("A", jan(1), 10.0),
            Reading::new("A", jan(2), 20.0),
            Reading::new("A", feb(1), 30.0),
            Reading::new("A", feb(2), 40.0),
        ];
        let threshold = RegionThreshold::calibrate(
            &series,
            Percentile::P90,
            CalibrationScope::PerRegionMonth,
            None,
        )
        .unwrap();
        // h = 1 * 0.9 -> lo + 0.9 * (hi - lo)
        assert_close(threshold.value_for(&series[0]), 19.0);
        assert_close(threshold.value_for(&series[2]), 39.0);

        let march = Reading::new("A", NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), 99.0);
        assert_eq!(threshold.value_for(&march), f64::INFINITY);
    }

    #[test]
    fn test_global_scope_uses_pooled_threshold() {
        let series = vec![Reading::new("A", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 10.0)];
        let threshold = RegionThreshold::calibrate(
            &series,
            Percentile::P90,
            CalibrationScope::Global,
            Some(42.0),
        )
        .unwrap();
        assert_eq!(threshold, RegionThreshold::Single(42.0));

        let missing =
            RegionThreshold::calibrate(&series, Percentile::P90, CalibrationScope::Global, None);
        assert!(missing.is_err());
    }
}
