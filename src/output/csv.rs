//! Delimited text serialization

use crate::table::{Cell, TypedTable};

/// Serialize a typed table as comma-delimited text with a header row
pub fn to_csv(table: &TypedTable) -> String {
    to_csv_with_delimiter(table, ',')
}

/// Serialize a typed table as delimited text with a header row
///
/// Fields containing the delimiter, a double quote, a line break, or
/// leading or trailing whitespace are quoted, with inner quotes doubled.
/// Floats render via Rust's shortest round-trip formatting.
pub fn to_csv_with_delimiter(table: &TypedTable, delimiter: char) -> String {
    let mut out = String::new();

    let header: Vec<String> = table
        .names()
        .iter()
        .map(|name| escape_field(name, delimiter))
        .collect();
    out.push_str(&header.join(&delimiter.to_string()));
    out.push('\n');

    for row in 0..table.row_count() {
        let fields: Vec<String> = table
            .row(row)
            .into_iter()
            .map(|cell| match cell {
                Cell::Text(s) => escape_field(s, delimiter),
                other => other.to_string(),
            })
            .collect();
        out.push_str(&fields.join(&delimiter.to_string()));
        out.push('\n');
    }

    out
}

/// Quote a field the reader would otherwise split or trim
fn escape_field(field: &str, delimiter: char) -> String {
    let padded = field.starts_with(char::is_whitespace) || field.ends_with(char::is_whitespace);
    if padded
        || field.contains(delimiter)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
