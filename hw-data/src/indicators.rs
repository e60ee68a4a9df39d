//! Headline indicators across all regions of a detection run.

use hw_lst::summary::RegionSummary;
use serde::Serialize;

/// Dashboard-level roll-up of region summaries.
///
/// The means are taken over regions, so a region without events pulls
/// `mean_duration` and `mean_intensity` toward zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicators {
    pub region_count: usize,
    /// Sum of event counts over regions
    pub total_events: usize,
    /// Mean of the per-region mean durations
    pub mean_duration: f64,
    /// Longest event of any region
    pub max_duration: usize,
    /// Mean of the per-region mean intensities, °C
    pub mean_intensity: f64,
}

impl Indicators {
    pub fn from_summaries(summaries: &[RegionSummary]) -> Self {
        let region_count = summaries.len();
        if region_count == 0 {
            return Indicators {
                region_count: 0,
                total_events: 0,
                mean_duration: 0.0,
                max_duration: 0,
                mean_intensity: 0.0,
            };
        }
        let n = region_count as f64;
        Indicators {
            region_count,
            total_events: summaries.iter().map(|s| s.event_count).sum(),
            mean_duration: summaries.iter().map(|s| s.mean_duration).sum::<f64>() / n,
            max_duration: summaries.iter().map(|s| s.max_duration).max().unwrap_or(0),
            mean_intensity: summaries.iter().map(|s| s.mean_intensity).sum::<f64>() / n,
        }
    }
}
