//! Error types for tableflow
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

use crate::types::ScalarType;

/// The main error type for tableflow
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Load Errors
    // ============================================================================
    /// The column spec has zero entries
    #[error("Column spec is empty")]
    EmptySpec,

    #[error("Unknown column(s) in spec: {}", .columns.join(", "))]
    UnknownColumn {
        /// The spec columns absent from the source header
        columns: Vec<String>,
    },

    #[error("Cannot cast row {row}, column '{column}': {value:?} is not a valid {target}")]
    CastError {
        /// Zero-based data row index
        row: usize,
        /// Column name from the spec
        column: String,
        /// The offending cell text
        value: String,
        /// The declared target type
        target: ScalarType,
    },

    /// The delimited source could not be parsed
    #[error("CSV parsing error: {message}")]
    CsvParse {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// A configuration value is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A run date is not a calendar date
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// What went wrong
        message: String,
    },

    /// YAML deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Storage Errors
    // ============================================================================
    /// An object store operation failed
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// An object path could not be constructed
    #[error("Invalid storage path: {0}")]
    StoragePath(#[from] object_store::path::Error),

    /// Local filesystem I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Arrow Errors
    // ============================================================================
    /// An Arrow operation failed
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Serialization or interchange failed
    #[error("Output error: {message}")]
    Output {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Secret Errors
    // ============================================================================
    /// No secret exists at the (scope, key) pair
    #[error("Secret not found: scope '{scope}', key '{key}'")]
    SecretNotFound {
        /// Requested scope
        scope: String,
        /// Requested key
        key: String,
    },

    // ============================================================================
    // Database Errors
    // ============================================================================
    /// A relational sink operation failed
    #[error("Database error: {message}")]
    Database {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Uncategorized error with context
    #[error("{0}")]
    Other(String),

    /// Wrapped error from the binary edge
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an unknown-column error
    pub fn unknown_column(columns: Vec<String>) -> Self {
        Self::UnknownColumn { columns }
    }

    /// Create a cast error
    pub fn cast(row: usize, column: impl Into<String>, value: impl Into<String>, target: ScalarType) -> Self {
        Self::CastError {
            row,
            column: column.into(),
            value: value.into(),
            target,
        }
    }

    /// Create a CSV parse error
    pub fn csv_parse(message: impl Into<String>) -> Self {
        Self::CsvParse {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-date error
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Create a secret-not-found error
    pub fn secret_not_found(scope: impl Into<String>, key: impl Into<String>) -> Self {
        Self::SecretNotFound {
            scope: scope.into(),
            key: key.into(),
        }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Result type alias for tableflow
pub type Result<T> = std::result::Result<T, Error>;
