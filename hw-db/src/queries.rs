//! Typed query methods over the in-memory database.
//!
//! Each query returns serializable model structs ready for CSV or JSON
//! export. Dates are `YYYY-MM-DD` strings.

use crate::models::{DateValue, EventRow, RegionInfo, RegionSummaryRow};
use crate::Database;
use rusqlite::params;

impl Database {
    // ───────────────────── Region Queries ─────────────────────

    /// Get list of all regions, ordered by region id.
    pub fn query_regions(&self) -> anyhow::Result<Vec<RegionInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT region_id, name FROM regions ORDER BY region_id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RegionInfo {
                    region_id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[HW] query: query_regions returned {} records", rows.len());
        Ok(rows)
    }

    // ───────────────────── Reading Queries ─────────────────────

    /// Get the daily series of one region within an inclusive date range.
    ///
    /// Ordered chronologically; duplicate dates appear once per stored reading.
    pub fn query_region_history(
        &self,
        region_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> anyhow::Result<Vec<DateValue>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, value FROM readings
             WHERE region_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date, rowid",
        )?;
        let rows = stmt
            .query_map(params![region_id, start_date, end_date], |row| {
                Ok(DateValue {
                    date: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[HW] query: query_region_history({}) returned {} records",
            region_id,
            rows.len()
        );
        Ok(rows)
    }

    /// Get the (min, max) date range over all readings.
    ///
    /// Returns `None` when no readings are loaded.
    pub fn query_date_range(&self) -> anyhow::Result<Option<(String, String)>> {
        let conn = self.conn.borrow();
        let range = conn.query_row("SELECT MIN(date), MAX(date) FROM readings", [], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
        let range = match range {
            (Some(min_date), Some(max_date)) => Some((min_date, max_date)),
            _ => None,
        };
        log::info!("[HW] query: query_date_range returned {:?}", range);
        Ok(range)
    }

    // ───────────────────── Result Queries ─────────────────────

    /// Get the choropleth table: every region with its stored summary.
    ///
    /// Regions without a summary row keep `None` statistics. Ordered by
    /// region id.
    pub fn query_region_summaries(&self) -> anyhow::Result<Vec<RegionSummaryRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT r.region_id, r.name,
                    s.event_count, s.mean_duration, s.max_duration, s.mean_intensity
             FROM regions r
             LEFT JOIN summaries s ON s.region_id = r.region_id
             ORDER BY r.region_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RegionSummaryRow {
                    region_id: row.get(0)?,
                    name: row.get(1)?,
                    event_count: row.get(2)?,
                    mean_duration: row.get(3)?,
                    max_duration: row.get(4)?,
                    mean_intensity: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[HW] query: query_region_summaries returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get region ids that have a summary but no boundary row.
    ///
    /// These are readings whose region name does not match the boundary
    /// layer and would be missing from the map.
    pub fn query_unmatched_regions(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT s.region_id FROM summaries s
             LEFT JOIN regions r ON r.region_id = s.region_id
             WHERE r.region_id IS NULL
             ORDER BY s.region_id",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "[HW] query: query_unmatched_regions returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get the stored events of one region, chronologically.
    pub fn query_region_events(&self, region_id: &str) -> anyhow::Result<Vec<EventRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT region_id, start_date, end_date, duration, mean_excess, max_excess
             FROM events WHERE region_id = ?1
             ORDER BY start_date",
        )?;
        let rows = stmt
            .query_map(params![region_id], |row| {
                Ok(EventRow {
                    region_id: row.get(0)?,
                    start_date: row.get(1)?,
                    end_date: row.get(2)?,
                    duration: row.get(3)?,
                    mean_excess: row.get(4)?,
                    max_excess: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[HW] query: query_region_events({}) returned {} records",
            region_id,
            rows.len()
        );
        Ok(rows)
    }
}
