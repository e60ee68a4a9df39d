use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum number of consecutive qualifying readings for a run to count as
/// a heat wave.
pub const MIN_EVENT_DURATION: usize = 3;

/// A heat-wave event: a maximal run of readings at or above the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatWaveEvent {
    pub region_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Number of qualifying readings in the run (always >= `MIN_EVENT_DURATION`)
    pub duration: usize,
    /// Average of `value - threshold` over the run, °C
    pub mean_excess: f64,
    /// Largest `value - threshold` in the run, °C
    pub max_excess: f64,
}

impl HeatWaveEvent {
    /// True when the two events share at least one calendar day.
    pub fn overlaps(&self, other: &HeatWaveEvent) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
