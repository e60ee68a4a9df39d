//! Detection settings, loadable from a JSON file.

use crate::calibration::CalibrationScope;
use crate::extraction::GapPolicy;
use hw_lst::error::Result;
use hw_lst::filter::{MonthSet, YearRange};
use hw_lst::percentile::Percentile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Selections that drive one detection run.
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes:
///
/// ```json
/// { "percentile": 95, "months": [11, 12, 1, 2], "years": { "start": 2003, "end": 2022 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Extremeness cutoff.
    pub percentile: Percentile,

    /// Calendar months kept before calibration (default January-March).
    pub months: MonthSet,

    /// Inclusive year range kept before calibration; all years when absent.
    pub years: Option<YearRange>,

    /// Which readings each threshold is calibrated over.
    pub scope: CalibrationScope,

    /// Whether calendar gaps end a run.
    pub gap_policy: GapPolicy,
}

impl DetectionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectionConfig::default();
        assert_eq!(config.percentile, Percentile::P90);
        assert_eq!(config.months.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(config.years.is_none());
        assert_eq!(config.scope, CalibrationScope::PerRegion);
        assert_eq!(config.gap_policy, GapPolicy::IndexAdjacent);
    }

    #[test]
    fn test_partial_json() {
        let config = DetectionConfig::from_json_str(
            r#"{ "percentile": 97.5, "years": { "start": 2003, "end": 2022 }, "scope": "per-region-month" }"#,
        )
        .unwrap();
        assert_eq!(config.percentile, Percentile::P97_5);
        assert_eq!(config.months, MonthSet::default());
        assert_eq!(config.years, Some(YearRange::new(2003, 2022).unwrap()));
        assert_eq!(config.scope, CalibrationScope::PerRegionMonth);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(DetectionConfig::from_json_str(r#"{ "percentile": 99 }"#).is_err());
        assert!(DetectionConfig::from_json_str(r#"{ "months": [0, 1] }"#).is_err());
        assert!(DetectionConfig::from_json_str(r#"{ "threshold": 30 }"#).is_err());
        assert!(DetectionConfig::from_json_str(r#"{ "gap_policy": "sometimes" }"#).is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = DetectionConfig {
            gap_policy: GapPolicy::CalendarAdjacent,
            ..DetectionConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DetectionConfig::from_json_str(&json).unwrap(), config);
    }
}
