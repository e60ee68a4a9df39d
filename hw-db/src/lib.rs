//! In-memory SQLite database layer for heat-wave detection results.
//!
//! This crate loads the boundary layer's region list, the normalized daily
//! readings and the results of a detection run into an in-memory SQLite
//! database, and exposes typed query methods for the map, chart and table
//! views.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in a single thread
//! - In-memory SQLite via `rusqlite`
//! - Region attribute tables loaded from CSV strings
//! - Readings and results stored from the typed `hw-lst` records
//! - Typed query methods returning serializable structs for CSV/JSON export
//!
//! # Usage
//!
//! ```rust
//! use hw_db::Database;
//! use hw_lst::summary::RegionSummary;
//!
//! let db = Database::new().unwrap();
//! db.load_regions("NM_MICRO,name\nPajeú,Sertão do Pajeú\nMoxotó,Sertão do Moxotó\n").unwrap();
//! db.store_summaries(&[RegionSummary::empty("Pajeú")]).unwrap();
//!
//! let rows = db.query_region_summaries().unwrap();
//! assert_eq!(rows.len(), 2);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `regions` - Boundary join keys
//! - `readings` - Daily land-surface temperature (°C)
//! - `summaries` / `events` - Results of the latest detection run
//!
//! The choropleth table is a `LEFT JOIN` of `summaries` onto `regions`, so a
//! region that never had readings keeps its row with empty statistics.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding regions, readings and detection results.
///
/// This struct is cheaply cloneable (via `Rc`); clones share one connection.
///
/// # Example
///
/// ```rust
/// use hw_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_regions("NM_MICRO,name\nPajeú,Sertão do Pajeú\n").unwrap();
/// let regions = db.query_regions().unwrap();
/// assert_eq!(regions.len(), 1);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` and `store_*`
    /// methods to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        // Both should reference the same underlying connection
        db.load_regions("NM_MICRO,name\nPajeú,Sertão do Pajeú\n").unwrap();
        let regions = db2.query_regions().unwrap();
        assert_eq!(regions.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        let regions = db.query_regions().unwrap();
        assert!(regions.is_empty(), "New database should have no regions");
        assert!(db.query_date_range().unwrap().is_none());
    }
}
