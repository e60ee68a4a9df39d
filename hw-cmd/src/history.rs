//! Daily series subcommand, served from the in-memory database.

use crate::input::Sources;
use crate::output::{write_records, OutputFormat};
use hw_db::Database;
use hw_utils::dates::{format_date, parse_date};
use std::path::Path;

/// Normalize a `YYYY-MM-DD` bound to the zero-padded form stored in the
/// database.
fn date_bound(flag: &str, value: &str) -> anyhow::Result<String> {
    let date = parse_date(value.trim()).map_err(|e| {
        anyhow::anyhow!("Invalid --{} date '{}' (expected YYYY-MM-DD): {}", flag, value, e)
    })?;
    Ok(format_date(&date))
}

/// Write the readings of `region` between `start` and `end` (inclusive,
/// `YYYY-MM-DD`); open bounds default to the loaded date range.
pub fn run_history(
    sources: &mut Sources,
    input: &Path,
    region: &str,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let start = start.map(|value| date_bound("start", value)).transpose()?;
    let end = end.map(|value| date_bound("end", value)).transpose()?;
    if let (Some(start), Some(end)) = (&start, &end) {
        if start > end {
            anyhow::bail!("--start {} is after --end {}", start, end);
        }
    }

    let readings = sources.readings(input)?;
    let db = Database::new()?;
    db.load_readings(&readings)?;

    let Some((first, last)) = db.query_date_range()? else {
        anyhow::bail!("No readings in {}", input.display());
    };
    let start = start.as_deref().unwrap_or(first.as_str());
    let end = end.as_deref().unwrap_or(last.as_str());

    let history = db.query_region_history(region, start, end)?;
    if history.is_empty() {
        log::warn!("[HW] history: no readings for {} between {} and {}", region, start, end);
    }
    write_records(&history, output, format)
}
