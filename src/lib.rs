// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tableflow
//!
//! A minimal, Rust-native toolkit for typed tabular ingest and egress.
//!
//! ## Features
//!
//! - **Typed Table Loader**: Parse delimited files, project named columns
//!   and cast them to a declared scalar type, all-or-nothing
//! - **Storage Mounts**: One URL-addressed surface over S3, GCS, Azure
//!   Blob and the local filesystem
//! - **Arrow Interchange**: Lossless `TypedTable` ↔ `RecordBatch` conversion
//! - **Relational Sink**: Append and date-keyed replace into PostgreSQL,
//!   MySQL or SQLite through DuckDB, credentialed via a secret store
//! - **Managed Tables**: Save, read back and drop tables by name
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tableflow::table::{load_str, ColumnSpec};
//! use tableflow::types::ScalarType;
//!
//! fn main() -> tableflow::Result<()> {
//!     let spec = ColumnSpec::new()
//!         .with("col1", ScalarType::Text)
//!         .with("col2", ScalarType::Integer)
//!         .with("col3", ScalarType::Float64);
//!
//!     let table = load_str("col1,col2,col3\na,1,2.5\n", &spec, ',')?;
//!     assert_eq!(table.row_count(), 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Typed Table Loader                         │
//! │   parse → RawTable    validate(spec)    project + cast          │
//! │   load(source, ColumnSpec) → TypedTable                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬──────────────────────┐
//! │   Storage    │         Output           │      Database        │
//! ├──────────────┼──────────────────────────┼──────────────────────┤
//! │ S3 / GCS     │ Arrow RecordBatch        │ Postgres / MySQL     │
//! │ Azure Blob   │ Delimited text           │ SQLite via DuckDB    │
//! │ Local FS     │                          │ Managed tables       │
//! └──────────────┴──────────────────────────┴──────────────────────┘
//!                secrets: getSecret(scope, key) → credentials
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Typed table loading: RawTable, ColumnSpec, TypedTable
pub mod table;

/// Arrow interchange and delimited-text serialization
pub mod output;

/// Mounted object storage (S3, GCS, Azure, local)
pub mod storage;

/// Secret store access
pub mod secrets;

/// Relational sink and managed tables via DuckDB
pub mod database;

/// Run configuration: dates and YAML job files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use table::{load_path, load_str, ColumnSpec, TypedTable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
