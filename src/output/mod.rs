//! Output module
//!
//! Handles serialization of typed tables and Arrow interchange.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting a `TypedTable` to an Arrow `RecordBatch` and back
//! - Serializing a `TypedTable` to delimited text with a header row

mod arrow;
mod csv;

pub use self::arrow::{from_record_batch, to_record_batch};
pub use self::csv::{to_csv, to_csv_with_delimiter};

#[cfg(test)]
mod tests;
