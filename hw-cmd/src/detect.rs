//! Heat-wave detection subcommands.

use crate::input::Sources;
use crate::output::{write_records, OutputFormat};
use crate::selection::SelectionArgs;
use hw_data::indicators::Indicators;
use hw_data::pipeline::{self, RegionResult};
use hw_db::Database;
use hw_lst::event::HeatWaveEvent;
use std::path::Path;

/// Load `input` and run detection with the resolved selection.
fn detect(
    sources: &mut Sources,
    input: &Path,
    selection: &SelectionArgs,
) -> anyhow::Result<Vec<RegionResult>> {
    let config = selection.resolve()?;
    let readings = sources.readings(input)?;
    let results = pipeline::run(&readings, &config)?;
    Ok(results)
}

/// Write one summary row per region.
///
/// With a boundary table the rows come from the region list joined with the
/// summaries, so regions without any readings appear with empty statistics
/// and readings whose region matches no boundary are reported.
pub fn run_detect(
    sources: &mut Sources,
    input: &Path,
    regions: Option<&Path>,
    selection: &SelectionArgs,
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let results = detect(sources, input, selection)?;
    let summaries = pipeline::summaries(&results);

    let Some(regions_path) = regions else {
        return write_records(&summaries, output, format);
    };

    let db = Database::new()?;
    let regions_csv = std::fs::read_to_string(regions_path)?;
    db.load_regions(&regions_csv).map_err(|e| {
        anyhow::anyhow!("Failed to load regions from {}: {}", regions_path.display(), e)
    })?;
    db.store_summaries(&summaries)?;

    let unmatched = db.query_unmatched_regions()?;
    if !unmatched.is_empty() {
        log::warn!(
            "[HW] detect: {} regions have readings but no boundary: {}",
            unmatched.len(),
            unmatched.join(", ")
        );
    }

    let rows = db.query_region_summaries()?;
    write_records(&rows, output, format)
}

/// Write every detected event, optionally for a single region.
pub fn run_events(
    sources: &mut Sources,
    input: &Path,
    region: Option<&str>,
    selection: &SelectionArgs,
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let results = detect(sources, input, selection)?;
    let events: Vec<HeatWaveEvent> = results
        .into_iter()
        .filter(|r| region.map_or(true, |id| r.region_id == id))
        .flat_map(|r| r.events)
        .collect();
    if let Some(id) = region {
        if events.is_empty() {
            log::warn!("[HW] events: no events for region {}", id);
        }
    }
    write_records(&events, output, format)
}

/// Write the dashboard indicators of a detection run.
pub fn run_indicators(
    sources: &mut Sources,
    input: &Path,
    selection: &SelectionArgs,
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let results = detect(sources, input, selection)?;
    let indicators = Indicators::from_summaries(&pipeline::summaries(&results));
    write_records(&[indicators], output, format)
}
