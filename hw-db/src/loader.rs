//! Loading functions for populating the in-memory SQLite database.
//!
//! Regions come from the boundary layer's attribute table (a CSV string);
//! readings and detection results come from the typed `hw-lst` records.
//! Every bulk insert runs inside one transaction.
//!
//! # CSV Formats
//!
//! - **Regions** (has headers): an id column (`NM_MICRO`, `region_id`,
//!   `region`, `micro`, `municipio` or `id`) and an optional name column
//!   (`name`, `NM_MUN`, `nome`); any other columns are ignored.

use crate::Database;
use hw_lst::event::HeatWaveEvent;
use hw_lst::reading::Reading;
use hw_lst::region::Region;
use hw_lst::summary::RegionSummary;
use hw_utils::dates::format_date;
use rusqlite::params;

impl Database {
    /// Load region metadata from the boundary layer's attribute table.
    ///
    /// # Example CSV
    /// ```text
    /// CD_MICRO,NM_MICRO,name
    /// 26001,Pajeú,Sertão do Pajeú
    /// ```
    pub fn load_regions(&self, csv_data: &str) -> anyhow::Result<()> {
        let regions = Region::parse_region_csv(csv_data)?;
        self.insert_regions(&regions)
    }

    /// Insert already parsed regions, replacing any with the same id.
    pub fn insert_regions(&self, regions: &[Region]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO regions (region_id, name) VALUES (?1, ?2)",
            )?;
            for region in regions {
                stmt.execute(params![region.region_id, region.name])?;
            }
        }
        tx.commit()?;
        log::info!("[HW] loader: Loaded {} regions", regions.len());
        Ok(())
    }

    /// Append normalized readings.
    ///
    /// Duplicate (region, date) pairs are kept, matching what the detector
    /// sees.
    pub fn load_readings(&self, readings: &[Reading]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO readings (region_id, date, value) VALUES (?1, ?2, ?3)",
            )?;
            for r in readings {
                stmt.execute(params![r.region_id, format_date(&r.date), r.value])?;
            }
        }
        tx.commit()?;
        log::info!("[HW] loader: Loaded {} readings", readings.len());
        Ok(())
    }

    /// Store the summaries of a detection run, replacing the previous run.
    pub fn store_summaries(&self, summaries: &[RegionSummary]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM summaries", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO summaries
                 (region_id, event_count, mean_duration, max_duration, mean_intensity)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for s in summaries {
                stmt.execute(params![
                    s.region_id,
                    s.event_count as i64,
                    s.mean_duration,
                    s.max_duration as i64,
                    s.mean_intensity
                ])?;
            }
        }
        tx.commit()?;
        log::info!("[HW] loader: Stored {} region summaries", summaries.len());
        Ok(())
    }

    /// Store the events of a detection run, replacing the previous run.
    pub fn store_events(&self, events: &[HeatWaveEvent]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM events", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO events
                 (region_id, start_date, end_date, duration, mean_excess, max_excess)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for e in events {
                stmt.execute(params![
                    e.region_id,
                    format_date(&e.start_date),
                    format_date(&e.end_date),
                    e.duration as i64,
                    e.mean_excess,
                    e.max_excess
                ])?;
            }
        }
        tx.commit()?;
        log::info!("[HW] loader: Stored {} events", events.len());
        Ok(())
    }
}
