//! Query result model structs.
//!
//! All structs derive `Serialize` so the command layer can write them as
//! CSV or JSON for the map, chart and table views.

use serde::Serialize;

/// A single (date, value) pair used for line chart data points.
///
/// `value` is land-surface temperature in °C.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateValue {
    pub date: String,
    pub value: f64,
}

/// Region metadata for selection lists and map labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionInfo {
    pub region_id: String,
    pub name: Option<String>,
}

/// One row of the choropleth table: a boundary region with its summary.
///
/// The statistics are `None` for regions that had no readings at all in
/// the latest run, which the map shows as "no data" rather than as zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionSummaryRow {
    pub region_id: String,
    pub name: Option<String>,
    pub event_count: Option<i64>,
    pub mean_duration: Option<f64>,
    pub max_duration: Option<i64>,
    /// Mean excess over the threshold, °C
    pub mean_intensity: Option<f64>,
}

/// A stored heat-wave event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventRow {
    pub region_id: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: i64,
    pub mean_excess: f64,
    pub max_excess: f64,
}
