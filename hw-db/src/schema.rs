//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `regions` - Boundary join keys (region ID, optional display name)
/// - `readings` - Normalized daily temperature readings (region_id, date, value in °C)
/// - `summaries` - Per-region heat-wave summaries of the latest detection run
/// - `events` - Per-region heat-wave events of the latest detection run
///
/// Dates are stored as `YYYY-MM-DD` text so lexical order is chronological.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        region_id TEXT PRIMARY KEY,
        name TEXT
    );

    CREATE TABLE IF NOT EXISTS readings (
        region_id TEXT NOT NULL,
        date TEXT NOT NULL,
        value REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_readings_region ON readings(region_id);
    CREATE INDEX IF NOT EXISTS idx_readings_date ON readings(date);

    CREATE TABLE IF NOT EXISTS summaries (
        region_id TEXT PRIMARY KEY,
        event_count INTEGER NOT NULL,
        mean_duration REAL NOT NULL,
        max_duration INTEGER NOT NULL,
        mean_intensity REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS events (
        region_id TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        duration INTEGER NOT NULL,
        mean_excess REAL NOT NULL,
        max_excess REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_events_region ON events(region_id);
    "#
}
