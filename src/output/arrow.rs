//! Arrow RecordBatch interchange
//!
//! The columnar hand-off format between the typed table model and
//! Arrow-consuming sinks. The mapping is exact: Text ↔ Utf8,
//! Integer ↔ Int64, Float32 ↔ Float32, Float64 ↔ Float64. Tables carry
//! no nulls, so every field is non-nullable on the way out and a null
//! cell is an error on the way in.

use crate::error::{Error, Result};
use crate::table::{Column, TypedTable};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Convert a typed table to an Arrow RecordBatch
pub fn to_record_batch(table: &TypedTable) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(table.column_count());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.column_count());

    for (name, column) in table.names().iter().zip(table.columns()) {
        let (data_type, array): (DataType, ArrayRef) = match column {
            Column::Text(v) => (
                DataType::Utf8,
                Arc::new(StringArray::from_iter_values(v.iter().map(String::as_str))),
            ),
            Column::Integer(v) => (
                DataType::Int64,
                Arc::new(Int64Array::from_iter_values(v.iter().copied())),
            ),
            Column::Float32(v) => (
                DataType::Float32,
                Arc::new(Float32Array::from_iter_values(v.iter().copied())),
            ),
            Column::Float64(v) => (
                DataType::Float64,
                Arc::new(Float64Array::from_iter_values(v.iter().copied())),
            ),
        };
        fields.push(Field::new(name, data_type, false));
        arrays.push(array);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).map_err(Error::Arrow)
}

/// Convert an Arrow RecordBatch back to a typed table
///
/// Only the four supported scalar types are accepted; any other Arrow
/// type, and any null cell, is an `Output` error.
pub fn from_record_batch(batch: &RecordBatch) -> Result<TypedTable> {
    let schema = batch.schema();
    let mut names = Vec::with_capacity(batch.num_columns());
    let mut columns = Vec::with_capacity(batch.num_columns());

    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        if array.null_count() > 0 {
            return Err(Error::output(format!(
                "column '{}' contains nulls, which typed tables cannot hold",
                field.name()
            )));
        }

        let column = match field.data_type() {
            DataType::Utf8 => {
                let arr = downcast::<StringArray>(array, field.name())?;
                Column::Text((0..arr.len()).map(|i| arr.value(i).to_string()).collect())
            }
            DataType::Int64 => {
                let arr = downcast::<Int64Array>(array, field.name())?;
                Column::Integer(arr.values().to_vec())
            }
            DataType::Float32 => {
                let arr = downcast::<Float32Array>(array, field.name())?;
                Column::Float32(arr.values().to_vec())
            }
            DataType::Float64 => {
                let arr = downcast::<Float64Array>(array, field.name())?;
                Column::Float64(arr.values().to_vec())
            }
            other => {
                return Err(Error::output(format!(
                    "unsupported Arrow type {other} in column '{}'",
                    field.name()
                )))
            }
        };

        names.push(field.name().clone());
        columns.push(column);
    }

    Ok(TypedTable::from_parts(names, columns))
}

/// Downcast an array ref to a concrete array type
fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::output(format!("column '{name}' has an unexpected array layout")))
}
