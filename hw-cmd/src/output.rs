//! CSV and JSON writers for command results.

use clap::ValueEnum;
use hw_data::indicators::Indicators;
use hw_data::seasonality::MonthlyMean;
use hw_db::models::{DateValue, RegionSummaryRow};
use hw_lst::event::HeatWaveEvent;
use hw_lst::summary::RegionSummary;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// A record written as one table row.
///
/// `COLUMNS` is the CSV header, in field order, so an empty result still
/// produces a header-only table.
pub trait Tabular: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl Tabular for RegionSummary {
    const COLUMNS: &'static [&'static str] =
        &["region_id", "event_count", "mean_duration", "max_duration", "mean_intensity"];
}

impl Tabular for RegionSummaryRow {
    const COLUMNS: &'static [&'static str] = &[
        "region_id",
        "name",
        "event_count",
        "mean_duration",
        "max_duration",
        "mean_intensity",
    ];
}

impl Tabular for HeatWaveEvent {
    const COLUMNS: &'static [&'static str] =
        &["region_id", "start_date", "end_date", "duration", "mean_excess", "max_excess"];
}

impl Tabular for Indicators {
    const COLUMNS: &'static [&'static str] =
        &["region_count", "total_events", "mean_duration", "max_duration", "mean_intensity"];
}

impl Tabular for MonthlyMean {
    const COLUMNS: &'static [&'static str] = &["month", "mean_value", "reading_count"];
}

impl Tabular for DateValue {
    const COLUMNS: &'static [&'static str] = &["date", "value"];
}

/// Write `records` to `output`, or to stdout when no path is given.
pub fn write_records<T: Tabular>(
    records: &[T],
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    write_to(records, writer, format)?;
    match output {
        Some(path) => {
            log::info!("[HW] output: Wrote {} records to {}", records.len(), path.display())
        }
        None => log::info!("[HW] output: Wrote {} records to stdout", records.len()),
    }
    Ok(())
}

fn write_to<T: Tabular, W: Write>(
    records: &[T],
    mut writer: W,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer);
            wtr.write_record(T::COLUMNS)?;
            for record in records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}
