//! The typed table loader
//!
//! `load` parses a delimited source, validates the requested columns,
//! projects them in spec order and casts every cell to its declared type.
//! Construction is all-or-nothing: one bad cell fails the entire load.

use crate::error::{Error, Result};
use crate::table::raw::RawTable;
use crate::table::spec::ColumnSpec;
use crate::table::typed::{Column, TypedTable};
use crate::types::ScalarType;
use std::path::Path;

/// Load a typed table from delimited text
///
/// Fails with `EmptySpec` if the spec has no entries, `UnknownColumn` if
/// any spec column is missing from the header, and `CastError` (naming the
/// row index and column) on the first cell that does not parse as its
/// declared type. A header-only source yields a zero-row table with the
/// full schema.
pub fn load_str(source: &str, spec: &ColumnSpec, delimiter: char) -> Result<TypedTable> {
    if spec.is_empty() {
        return Err(Error::EmptySpec);
    }
    let raw = RawTable::parse(source, delimiter)?;
    project(&raw, spec)
}

/// Load a typed table from a local file
pub fn load_path(path: impl AsRef<Path>, spec: &ColumnSpec, delimiter: char) -> Result<TypedTable> {
    let text = std::fs::read_to_string(path)?;
    load_str(&text, spec, delimiter)
}

/// Project a parsed table down to the spec's columns and cast them
///
/// Validation happens up front so the error names every missing column,
/// not just the first.
pub fn project(raw: &RawTable, spec: &ColumnSpec) -> Result<TypedTable> {
    if spec.is_empty() {
        return Err(Error::EmptySpec);
    }

    let missing: Vec<String> = spec
        .iter()
        .filter(|def| raw.column_index(&def.name).is_none())
        .map(|def| def.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(Error::unknown_column(missing));
    }

    let mut names = Vec::with_capacity(spec.len());
    let mut columns = Vec::with_capacity(spec.len());
    for def in spec.iter() {
        // Validated above, so the index lookup cannot fail
        let index = raw
            .column_index(&def.name)
            .ok_or_else(|| Error::unknown_column(vec![def.name.clone()]))?;
        columns.push(cast_column(raw, index, &def.name, def.scalar_type)?);
        names.push(def.name.clone());
    }

    Ok(TypedTable::from_parts(names, columns))
}

/// Cast every cell of one source column to the target type
fn cast_column(raw: &RawTable, index: usize, name: &str, target: ScalarType) -> Result<Column> {
    let cells = raw.column_values(index);
    match target {
        ScalarType::Text => Ok(Column::Text(cells.map(String::from).collect())),
        ScalarType::Integer => cells
            .enumerate()
            .map(|(row, cell)| {
                cell.trim()
                    .parse::<i64>()
                    .map_err(|_| Error::cast(row, name, cell, target))
            })
            .collect::<Result<Vec<_>>>()
            .map(Column::Integer),
        ScalarType::Float32 => cells
            .enumerate()
            .map(|(row, cell)| {
                cell.trim()
                    .parse::<f32>()
                    .map_err(|_| Error::cast(row, name, cell, target))
            })
            .collect::<Result<Vec<_>>>()
            .map(Column::Float32),
        ScalarType::Float64 => cells
            .enumerate()
            .map(|(row, cell)| {
                cell.trim()
                    .parse::<f64>()
                    .map_err(|_| Error::cast(row, name, cell, target))
            })
            .collect::<Result<Vec<_>>>()
            .map(Column::Float64),
    }
}
