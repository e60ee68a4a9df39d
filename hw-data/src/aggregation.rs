//! Roll-up of a region's events into a [`RegionSummary`].

use hw_lst::event::HeatWaveEvent;
use hw_lst::summary::RegionSummary;

/// Summarize the events of one region.
///
/// With no events every numeric field is zero.
pub fn summarize(region_id: &str, events: &[HeatWaveEvent]) -> RegionSummary {
    if events.is_empty() {
        return RegionSummary::empty(region_id);
    }
    let count = events.len() as f64;
    let total_duration: usize = events.iter().map(|e| e.duration).sum();
    let total_intensity: f64 = events.iter().map(|e| e.mean_excess).sum();
    RegionSummary {
        region_id: region_id.to_string(),
        event_count: events.len(),
        mean_duration: total_duration as f64 / count,
        max_duration: events.iter().map(|e| e.duration).max().unwrap_or(0),
        mean_intensity: total_intensity / count,
    }
}
