//! Loading temperature tables into normalized readings.
//!
//! Two table shapes are supported:
//!
//! - **Region tables**: one table per region, the region id supplied by the
//!   caller (for files, the file stem). This is how per-region Earth Engine
//!   exports arrive.
//! - **Long tables**: one table with a region column, see
//!   [`crate::schema::REGION_CANDIDATES`].
//!
//! Rows with an unparseable date or a non-numeric temperature are dropped
//! and counted; a missing column fails the whole table.

use crate::error::{LstError, Result};
use crate::reading::Reading;
use crate::schema::TableSchema;
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use hw_utils::dates::parse_flexible;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Open a source file, transparently decompressing `.gz` files.
pub fn open_source(path: &Path) -> Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Derive a region id from a file name: `Sertão do Pajeú.csv.gz` -> `Sertão do Pajeú`.
pub fn region_id_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let name = name.strip_suffix(".gz").unwrap_or(name);
    let name = name.strip_suffix(".csv").unwrap_or(name);
    (!name.is_empty()).then(|| name.to_string())
}

/// Parse a single date cell, mapping failures to [`LstError::InvalidDate`].
pub fn parse_date_cell(cell: &str) -> Result<chrono::NaiveDate> {
    parse_flexible(cell).map_err(|_| LstError::InvalidDate(cell.trim().to_string()))
}

/// Parse a temperature cell; `None` for empty, non-numeric or non-finite cells.
pub fn parse_value_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Default)]
struct Skipped {
    dates: u32,
    values: u32,
}

fn read_headers<R: Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<String>> {
    Ok(rdr.headers()?.iter().map(|h| h.trim().to_string()).collect())
}

fn record_to_reading(
    region_id: &str,
    record: &StringRecord,
    schema: &TableSchema,
    skipped: &mut Skipped,
) -> Option<Reading> {
    let date = match parse_date_cell(record.get(schema.date).unwrap_or("")) {
        Ok(d) => d,
        Err(e) => {
            log::debug!("[HW] loader: {}: dropping row: {}", region_id, e);
            skipped.dates += 1;
            return None;
        }
    };
    let value = match parse_value_cell(record.get(schema.value).unwrap_or("")) {
        Some(v) => v,
        None => {
            skipped.values += 1;
            return None;
        }
    };
    Some(Reading::new(region_id, date, value))
}

/// Load a table holding the series of a single region.
pub fn load_region_table<R: Read>(region_id: &str, reader: R) -> Result<Vec<Reading>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = read_headers(&mut rdr)?;
    let schema = TableSchema::for_region_table(region_id, &headers)?;

    let mut skipped = Skipped::default();
    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(reading) = record_to_reading(region_id, &record, &schema, &mut skipped) {
            readings.push(reading);
        }
    }
    log::info!(
        "[HW] loader: {}: Loaded {} readings, skipped {} invalid dates and {} invalid values",
        region_id,
        readings.len(),
        skipped.dates,
        skipped.values
    );
    Ok(readings)
}

/// Load a table holding the series of several regions.
///
/// `label` names the table in errors and logs (usually its path).
pub fn load_long_table<R: Read>(label: &str, reader: R) -> Result<Vec<Reading>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = read_headers(&mut rdr)?;
    let schema = TableSchema::for_long_table(label, &headers)?;
    let region_index = schema.region.unwrap_or_default();

    let mut skipped = Skipped::default();
    let mut skipped_regions = 0u32;
    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let region_id = record.get(region_index).unwrap_or("").trim();
        if region_id.is_empty() {
            skipped_regions += 1;
            continue;
        }
        if let Some(reading) = record_to_reading(region_id, &record, &schema, &mut skipped) {
            readings.push(reading);
        }
    }
    log::info!(
        "[HW] loader: {}: Loaded {} readings, skipped {} invalid dates, {} invalid values, {} without region",
        label,
        readings.len(),
        skipped.dates,
        skipped.values,
        skipped_regions
    );
    Ok(readings)
}

/// Load a single-region file; the region id is the file stem.
pub fn load_region_file(path: &Path) -> Result<Vec<Reading>> {
    let region_id = region_id_from_path(path).ok_or_else(|| {
        LstError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("cannot derive a region id from {}", path.display()),
        ))
    })?;
    load_region_table(&region_id, open_source(path)?)
}

/// Load a multi-region file.
pub fn load_long_file(path: &Path) -> Result<Vec<Reading>> {
    load_long_table(&path.display().to_string(), open_source(path)?)
}

/// Load every `*.csv` / `*.csv.gz` file of a directory as one region each.
///
/// Files are read in name order so the result is reproducible.
pub fn load_region_directory(dir: &Path) -> Result<Vec<Reading>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            path.is_file() && (name.ends_with(".csv") || name.ends_with(".csv.gz"))
        })
        .collect();
    paths.sort();

    let mut readings = Vec::new();
    for path in &paths {
        readings.extend(load_region_file(path)?);
    }
    log::info!(
        "[HW] loader: {}: Loaded {} region files",
        dir.display(),
        paths.len()
    );
    Ok(readings)
}

/// Load a path that is either a directory of region files or a long table.
pub fn load_path(path: &Path) -> Result<Vec<Reading>> {
    if path.is_dir() {
        load_region_directory(path)
    } else {
        load_long_file(path)
    }
}
