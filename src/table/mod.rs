//! Typed table loading
//!
//! The core of the crate: parse a delimited source into an untyped
//! [`RawTable`], then project and cast it against a [`ColumnSpec`] to
//! produce a [`TypedTable`] whose schema matches the spec exactly.
//!
//! # Overview
//!
//! - **Parse**: header row names columns, every cell is text
//! - **Validate**: every spec column must exist in the source
//! - **Project**: spec order wins, unlisted columns are dropped
//! - **Cast**: all-or-nothing, a single bad cell fails the whole load

mod loader;
mod raw;
mod spec;
mod typed;

pub use loader::{load_path, load_str, project};
pub use raw::RawTable;
pub use spec::{ColumnDef, ColumnSpec};
pub use typed::{Cell, Column, TypedTable};

#[cfg(test)]
mod tests;
