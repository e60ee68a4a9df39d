/// Error types for heat-wave detection
use thiserror::Error;

/// Main error type for source loading, calibration and configuration
#[derive(Error, Debug)]
pub enum LstError {
    /// A required column could not be located in a source table
    #[error("No {field} column found for {region} (columns: {available:?})")]
    MissingColumn {
        region: String,
        field: &'static str,
        available: Vec<String>,
    },

    /// Calibration was requested over zero readings
    #[error("Cannot calibrate a threshold over an empty set of readings")]
    EmptyInput,

    /// Calibration input contained NaN or infinite values
    #[error("Cannot calibrate a threshold over non-finite readings")]
    NonFiniteValue,

    /// A date cell could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Percentile outside the supported set
    #[error("Unsupported percentile: {0} (expected 90, 95 or 97.5)")]
    InvalidPercentile(String),

    /// Month outside 1..=12
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    /// Year range with start after end
    #[error("Invalid year range: {start} > {end}")]
    InvalidYearRange { start: i32, end: i32 },

    /// Unknown value for a named option
    #[error("Invalid value for {option}: {value}")]
    InvalidOption { option: &'static str, value: String },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read a source file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON document
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using LstError
pub type Result<T> = std::result::Result<T, LstError>;

#[cfg(test)]
mod tests {
    use super::LstError;

    #[test]
    fn missing_column_message_lists_alternatives() {
        let err = LstError::MissingColumn {
            region: "Sertão do Moxotó".to_string(),
            field: "date",
            available: vec!["valor".to_string(), "id".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("date"));
        assert!(message.contains("Sertão do Moxotó"));
        assert!(message.contains("\"valor\""));
        assert!(message.contains("\"id\""));
    }
}
