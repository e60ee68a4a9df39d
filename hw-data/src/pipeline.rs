//! Full detection pass: filter, calibrate, extract and summarize every region.
//!
//! Regions never share state, so with the `parallel` feature the per-region
//! loop runs on rayon's thread pool. Results are ordered by region id
//! either way.

use crate::aggregation::summarize;
use crate::calibration::{compute_threshold, CalibrationScope, RegionThreshold};
use crate::config::DetectionConfig;
use crate::extraction::extract_events_with;
use hw_lst::error::Result;
use hw_lst::event::HeatWaveEvent;
use hw_lst::filter::filter_readings;
use hw_lst::reading::Reading;
use hw_lst::summary::RegionSummary;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Detection output of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionResult {
    pub region_id: String,
    /// Readings left after the month/year filters.
    pub reading_count: usize,
    /// `None` when no readings survived the filters; nothing is calibrated
    /// over an empty pool.
    pub threshold: Option<RegionThreshold>,
    pub events: Vec<HeatWaveEvent>,
    pub summary: RegionSummary,
}

/// Run detection for every region present in `readings`.
///
/// A region whose readings are all filtered out still gets a result, with
/// no threshold, no events and an all-zero summary.
///
/// # Errors
///
/// Calibration errors ([`hw_lst::LstError::NonFiniteValue`]) abort the run.
pub fn run(readings: &[Reading], config: &DetectionConfig) -> Result<Vec<RegionResult>> {
    let region_ids: BTreeSet<&str> = readings.iter().map(|r| r.region_id.as_str()).collect();
    let filtered: Vec<Reading> =
        filter_readings(readings, &config.months, config.years.as_ref()).cloned().collect();
    log::info!(
        "[HW] pipeline: {} of {} readings kept (months {}, years {:?}), {} regions",
        filtered.len(),
        readings.len(),
        config.months,
        config.years.map(|y| (y.start(), y.end())),
        region_ids.len()
    );

    let global = match config.scope {
        CalibrationScope::Global if !filtered.is_empty() => {
            let values: Vec<f64> = filtered.iter().map(|r| r.value).collect();
            let threshold = compute_threshold(&values, config.percentile)?;
            log::info!(
                "[HW] pipeline: global P{} threshold {:.2}",
                config.percentile,
                threshold
            );
            Some(threshold)
        }
        _ => None,
    };

    let grouped: BTreeMap<String, Vec<Reading>> = Reading::group_by_region(filtered);
    let empty: Vec<Reading> = Vec::new();
    let detect = |region_id: &&str| -> Result<RegionResult> {
        let series = grouped.get(*region_id).unwrap_or(&empty);
        detect_region(region_id, series, config, global)
    };

    #[cfg(feature = "parallel")]
    let results = region_ids.par_iter().map(detect).collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let results = region_ids.iter().map(detect).collect::<Result<Vec<_>>>()?;

    let total_events: usize = results.iter().map(|r| r.summary.event_count).sum();
    log::info!(
        "[HW] pipeline: {} events across {} regions",
        total_events,
        results.len()
    );
    Ok(results)
}

/// Calibrate, extract and summarize one region's filtered series.
pub fn detect_region(
    region_id: &str,
    series: &[Reading],
    config: &DetectionConfig,
    global: Option<f64>,
) -> Result<RegionResult> {
    if series.is_empty() {
        log::debug!("[HW] pipeline: {}: no readings after filtering", region_id);
        return Ok(RegionResult {
            region_id: region_id.to_string(),
            reading_count: 0,
            threshold: None,
            events: Vec::new(),
            summary: RegionSummary::empty(region_id),
        });
    }

    let threshold = RegionThreshold::calibrate(series, config.percentile, config.scope, global)?;
    let events = extract_events_with(series, |r| threshold.value_for(r), config.gap_policy);
    let summary = summarize(region_id, &events);
    log::debug!(
        "[HW] pipeline: {}: {} readings, {} events",
        region_id,
        series.len(),
        events.len()
    );
    Ok(RegionResult {
        region_id: region_id.to_string(),
        reading_count: series.len(),
        threshold: Some(threshold),
        events,
        summary,
    })
}

/// The summaries of a run, in region order.
pub fn summaries(results: &[RegionResult]) -> Vec<RegionSummary> {
    results.iter().map(|r| r.summary.clone()).collect()
}
