use serde::{Deserialize, Serialize};

/// Per-region roll-up of heat-wave events.
///
/// A region with no events has every numeric field set to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region_id: String,
    pub event_count: usize,
    /// Mean event duration, in readings
    pub mean_duration: f64,
    /// Longest event duration, in readings
    pub max_duration: usize,
    /// Mean of the events' `mean_excess`, °C
    pub mean_intensity: f64,
}

impl RegionSummary {
    /// The summary of a region without events.
    pub fn empty(region_id: impl Into<String>) -> Self {
        RegionSummary {
            region_id: region_id.into(),
            event_count: 0,
            mean_duration: 0.0,
            max_duration: 0,
            mean_intensity: 0.0,
        }
    }
}
