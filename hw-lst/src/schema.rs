//! Schema normalization for temperature tables.
//!
//! Source tables come from different exports (Earth Engine, spreadsheets,
//! pandas dumps) and name their columns differently. This module locates
//! the date, temperature and region columns once per table so the rest of
//! the pipeline can work on [`crate::reading::Reading`] records.

use crate::error::{LstError, Result};

/// Date column names, in order of preference.
pub const DATE_CANDIDATES: &[&str] = &[
    "data",
    "date",
    "DATA",
    "time",
    "system:time_start",
    "timestamp",
];

/// Preferred temperature column name.
pub const VALUE_COLUMN: &str = "valor";

/// Substrings (lowercase) that mark a temperature column when
/// [`VALUE_COLUMN`] is absent.
pub const VALUE_MARKERS: &[&str] = &["lst", "temp"];

/// Region identifier column names for long (multi-region) tables.
pub const REGION_CANDIDATES: &[&str] = &["NM_MICRO", "region_id", "region", "micro", "municipio"];

/// Optional display-name columns of boundary tables.
pub const REGION_NAME_CANDIDATES: &[&str] = &["name", "NM_MUN", "nome"];

/// Return the index of the first candidate present in `headers`.
///
/// Candidates are tried in order, so the preference order of the list wins
/// over the column order of the table.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h == candidate))
}

/// Return the index of the temperature column: [`VALUE_COLUMN`] if present,
/// otherwise the first column (other than `skip`) whose lowercase name
/// contains one of [`VALUE_MARKERS`].
pub fn find_value_column(headers: &[String], skip: &[usize]) -> Option<usize> {
    if let Some(index) = headers.iter().position(|h| h == VALUE_COLUMN) {
        return Some(index);
    }
    headers.iter().enumerate().find_map(|(index, header)| {
        let lower = header.to_lowercase();
        let is_value = VALUE_MARKERS.iter().any(|marker| lower.contains(marker));
        (is_value && !skip.contains(&index)).then_some(index)
    })
}

/// Resolved column positions of one source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub date: usize,
    pub value: usize,
    /// Only resolved for long tables.
    pub region: Option<usize>,
}

impl TableSchema {
    /// Resolve the columns of a single-region table.
    ///
    /// `region` is only used to label the error when a column is missing.
    pub fn for_region_table(region: &str, headers: &[String]) -> Result<Self> {
        let date = find_column(headers, DATE_CANDIDATES)
            .ok_or_else(|| missing(region, "date", headers))?;
        let value = find_value_column(headers, &[date])
            .ok_or_else(|| missing(region, "temperature", headers))?;
        Ok(TableSchema {
            date,
            value,
            region: None,
        })
    }

    /// Resolve the columns of a long table holding several regions.
    pub fn for_long_table(label: &str, headers: &[String]) -> Result<Self> {
        let region = find_column(headers, REGION_CANDIDATES)
            .ok_or_else(|| missing(label, "region", headers))?;
        let date = find_column(headers, DATE_CANDIDATES)
            .ok_or_else(|| missing(label, "date", headers))?;
        let value = find_value_column(headers, &[date, region])
            .ok_or_else(|| missing(label, "temperature", headers))?;
        Ok(TableSchema {
            date,
            value,
            region: Some(region),
        })
    }
}

fn missing(region: &str, field: &'static str, headers: &[String]) -> LstError {
    LstError::MissingColumn {
        region: region.to_string(),
        field,
        available: headers.to_vec(),
    }
}
