//! Schema-validated, type-cast tables

use crate::table::spec::ColumnSpec;
use crate::types::ScalarType;

/// Columnar storage for one cast column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// UTF-8 text values
    Text(Vec<String>),
    /// Signed 64-bit integers
    Integer(Vec<i64>),
    /// 32-bit floats
    Float32(Vec<f32>),
    /// 64-bit floats
    Float64(Vec<f64>),
}

impl Column {
    /// Number of cells
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
        }
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The scalar type of this column
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Column::Text(_) => ScalarType::Text,
            Column::Integer(_) => ScalarType::Integer,
            Column::Float32(_) => ScalarType::Float32,
            Column::Float64(_) => ScalarType::Float64,
        }
    }

    /// Borrow the cell at `row`
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match self {
            Column::Text(v) => Cell::Text(&v[row]),
            Column::Integer(v) => Cell::Integer(v[row]),
            Column::Float32(v) => Cell::Float32(v[row]),
            Column::Float64(v) => Cell::Float64(v[row]),
        }
    }

    /// Text values, if this is a text column
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Column::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Integer values, if this is an integer column
    pub fn as_integer(&self) -> Option<&[i64]> {
        match self {
            Column::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// 32-bit float values, if this is a float32 column
    pub fn as_float32(&self) -> Option<&[f32]> {
        match self {
            Column::Float32(v) => Some(v),
            _ => None,
        }
    }

    /// 64-bit float values, if this is a float64 column
    pub fn as_float64(&self) -> Option<&[f64]> {
        match self {
            Column::Float64(v) => Some(v),
            _ => None,
        }
    }
}

/// A borrowed view of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Borrowed text cell
    Text(&'a str),
    /// Integer cell
    Integer(i64),
    /// 32-bit float cell
    Float32(f32),
    /// 64-bit float cell
    Float64(f64),
}

impl std::fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float32(v) => write!(f, "{v}"),
            Cell::Float64(v) => write!(f, "{v}"),
        }
    }
}

/// A uniformly typed table whose schema matches the spec that produced it
///
/// Column order is spec order; every column holds one value per source row.
/// Value-equal loads of the same source produce value-equal tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedTable {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl TypedTable {
    /// Assemble a table from parallel name and column vectors
    ///
    /// Callers must pass equal-length vectors of equal-length columns;
    /// [`crate::table::load_str`] is the usual way to obtain one.
    pub(crate) fn from_parts(names: Vec<String>, columns: Vec<Column>) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        Self { names, columns }
    }

    /// Column names in schema order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Columns in schema order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// The schema as a [`ColumnSpec`], in column order
    pub fn schema(&self) -> ColumnSpec {
        self.names
            .iter()
            .zip(&self.columns)
            .fold(ColumnSpec::new(), |spec, (name, col)| {
                spec.with(name, col.scalar_type())
            })
    }

    /// One row of cells, in schema order
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Vec<Cell<'_>> {
        self.columns.iter().map(|c| c.cell(row)).collect()
    }
}
