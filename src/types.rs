//! Common types used throughout tableflow
//!
//! Shared enums and type aliases used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Scalar Type
// ============================================================================

/// Target scalar type for a cast column
///
/// The closed set of cell types a [`crate::table::TypedTable`] column can
/// hold. Casting is dispatched over this enum; there is no open-ended
/// runtime typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    /// UTF-8 text, passed through unchanged
    Text,
    /// Base-10 signed 64-bit integer
    Integer,
    /// 32-bit IEEE 754 float
    Float32,
    /// 64-bit IEEE 754 float
    Float64,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Text => write!(f, "text"),
            ScalarType::Integer => write!(f, "integer"),
            ScalarType::Float32 => write!(f, "float32"),
            ScalarType::Float64 => write!(f, "float64"),
        }
    }
}

// ============================================================================
// Write Mode
// ============================================================================

/// How a table is written to a destination that may already hold data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Replace existing data
    #[default]
    Overwrite,
    /// Append new rows
    Append,
}

// ============================================================================
// Database Kind
// ============================================================================

/// Relational database flavor reachable through the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbKind {
    /// PostgreSQL via DuckDB's postgres extension
    Postgres,
    /// MySQL via DuckDB's mysql extension
    Mysql,
    /// SQLite via DuckDB's sqlite extension
    Sqlite,
    /// Native DuckDB (file or in-memory)
    #[default]
    Duckdb,
}
