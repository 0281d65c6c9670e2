//! # Error Types
//!
//! Structured error types for trade_core. The formula set itself only ever
//! fails with [`CalcError::InvalidInput`]: a calculation either runs to
//! completion or is rejected before it starts. The remaining variants belong
//! to the job file and price list layers.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length_m".to_string(),
//!             value: length_m.to_string(),
//!             reason: "Length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for trade_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-numeric, empty, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A key was not present in a static reference table
    #[error("No entry for {key} in {table}")]
    UnknownTableEntry { table: String, key: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Price list could not be parsed or is inconsistent
    #[error("Configuration error in '{source_name}': {reason}")]
    ConfigError { source_name: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownTableEntry error
    pub fn unknown_entry(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::UnknownTableEntry {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the user fixes by correcting a form field
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownTableEntry { .. } => "UNKNOWN_TABLE_ENTRY",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

/// Reject non-finite or non-positive values.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be greater than zero"));
    }
    Ok(value)
}

/// Reject non-finite or negative values. Zero is allowed.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(value)
}

/// Percentage between 0 and 100 inclusive.
pub(crate) fn require_percent(field: &str, value: f64) -> CalcResult<f64> {
    let value = require_non_negative(field, value)?;
    if value > 100.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Cannot exceed 100%"));
    }
    Ok(value)
}

/// Waste allowance must be a percentage between 0 and 100 inclusive.
pub(crate) fn require_waste_percent(field: &str, value: f64) -> CalcResult<f64> {
    let value = require_non_negative(field, value)?;
    if value > 100.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Waste cannot exceed 100%"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("current_a", "-5", "Must be greater than zero");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_entry("bsp", "5/16").error_code(), "UNKNOWN_TABLE_ENTRY");
        assert_eq!(CalcError::config_error("prices.toml", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_validation_helpers() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -0.1).is_err());
        assert!(require_waste_percent("w", 100.0).is_ok());
        assert!(require_waste_percent("w", 100.5).is_err());
        assert!(require_percent("p", 0.0).is_ok());
        assert!(require_percent("p", -1.0).is_err());
    }

    #[test]
    fn test_validation_failure_classification() {
        assert!(CalcError::invalid_input("a", "b", "c").is_validation_failure());
        assert!(!CalcError::file_error("open", "x", "y").is_validation_failure());
        assert!(CalcError::file_locked("p", "u", "t").is_recoverable());
    }
}
