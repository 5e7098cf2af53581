//! Core error types for wastewise-core.
//!
//! The decision engine itself is total; errors only arise at the edges
//! where external data enters the library (configuration files, festival
//! calendars and realtime bin snapshots).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wastewise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL construction errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised while converting realtime database records into bins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// The snapshot node is neither null, an array nor an object
    #[error("Unexpected snapshot shape: expected array or object, found {found}")]
    UnexpectedShape { found: String },

    /// A record could not be decoded (missing field, unknown enum value, ...)
    #[error("Invalid record '{id}': {message}")]
    InvalidRecord { id: String, message: String },

    /// Sensor reported a fill level outside 0-100
    #[error("Record '{id}' has fill level {fill_level} outside 0-100")]
    FillLevelOutOfRange { id: String, fill_level: i64 },

    /// `lastUpdated` could not be parsed
    #[error("Record '{id}' has unparseable timestamp '{value}'")]
    InvalidTimestamp { id: String, value: String },
}

impl IngestError {
    /// Identifier of the offending record, when the error is record-scoped.
    pub fn record_id(&self) -> Option<&str> {
        match self {
            IngestError::UnexpectedShape { .. } => None,
            IngestError::InvalidRecord { id, .. }
            | IngestError::FillLevelOutOfRange { id, .. }
            | IngestError::InvalidTimestamp { id, .. } => Some(id),
        }
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidValue { field, message } => {
                ConfigError::InvalidValue { key: field, message }
            }
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_is_exposed_for_record_errors() {
        let err = IngestError::FillLevelOutOfRange {
            id: "bin-7".into(),
            fill_level: 140,
        };
        assert_eq!(err.record_id(), Some("bin-7"));

        let err = IngestError::UnexpectedShape {
            found: "string".into(),
        };
        assert_eq!(err.record_id(), None);
    }

    #[test]
    fn validation_error_maps_to_config_key() {
        let err: ConfigError = ValidationError::InvalidValue {
            field: "fuel.mileage_km_per_liter".into(),
            message: "must be greater than zero".into(),
        }
        .into();
        assert!(err.to_string().contains("fuel.mileage_km_per_liter"));
    }
}
