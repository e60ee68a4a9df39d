//! Shared utility functions for heat-wave crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate};

    /// Date format used for normalized output and query parameters: "YYYY-MM-DD"
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Compact date format used by some exports: "YYYYMMDD"
    pub const COMPACT_FORMAT: &str = "%Y%m%d";

    /// Day-first format used by spreadsheet exports: "DD/MM/YYYY"
    pub const DAY_FIRST_FORMAT: &str = "%d/%m/%Y";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, ISO_FORMAT)?)
    }

    /// Parse a date string in "YYYYMMDD" format
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, COMPACT_FORMAT)?)
    }

    /// Convert milliseconds since the Unix epoch (UTC) to a calendar date.
    ///
    /// Earth Engine exports carry their timestamps this way
    /// (`system:time_start`).
    pub fn from_epoch_millis(millis: i64) -> anyhow::Result<NaiveDate> {
        DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| anyhow::anyhow!("epoch milliseconds out of range: {}", millis))
    }

    /// Parse a date cell whose format is not known up front.
    ///
    /// Accepted, in order:
    /// - 8 digits: "YYYYMMDD"
    /// - any other integer (or integral float such as `1.5463008e12`):
    ///   epoch milliseconds
    /// - "YYYY-MM-DD", optionally followed by a time part
    ///   ("YYYY-MM-DDTHH:MM:SS", "YYYY-MM-DD HH:MM:SS", ...)
    /// - "DD/MM/YYYY"
    pub fn parse_flexible(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("empty date");
        }

        let digits = s.strip_prefix('-').unwrap_or(s);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if s.len() == 8 {
                return parse_date_compact(s);
            }
            return from_epoch_millis(s.parse::<i64>()?);
        }

        if let Ok(millis) = s.parse::<f64>() {
            if millis.is_finite() && millis.fract() == 0.0 {
                return from_epoch_millis(millis as i64);
            }
            anyhow::bail!("not a whole number of milliseconds: {}", s);
        }

        if let Some(prefix) = s.get(..10) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, ISO_FORMAT) {
                // Anything after the date must be a time part.
                let rest = &s[10..];
                if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
                    return Ok(date);
                }
            }
        }

        Ok(NaiveDate::parse_from_str(s, DAY_FIRST_FORMAT)?)
    }

}
