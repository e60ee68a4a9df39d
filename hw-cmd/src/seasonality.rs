//! Monthly mean temperature subcommand.

use crate::input::Sources;
use crate::output::{write_records, OutputFormat};
use hw_data::seasonality::monthly_means;
use std::path::Path;

/// Write the mean of every calendar month, over all years and without the
/// detection filters, for one region or for all regions together.
pub fn run_seasonality(
    sources: &mut Sources,
    input: &Path,
    region: Option<&str>,
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let readings = sources.readings(input)?;
    let means = monthly_means(
        readings
            .iter()
            .filter(|r| region.map_or(true, |id| r.region_id == id)),
    );
    if means.is_empty() {
        anyhow::bail!(
            "No readings for {} in {}",
            region.unwrap_or("any region"),
            input.display()
        );
    }
    write_records(&means, output, format)
}
