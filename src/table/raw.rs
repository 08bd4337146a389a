//! Untyped parsed representation of a delimited source

use crate::error::{Error, Result};

/// A delimited source parsed into named, all-text columns
///
/// Produced once per source, immutable after parse. Every row has exactly
/// as many fields as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the header row, in source order
    header: Vec<String>,
    /// Data rows; each row has `header.len()` fields
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse delimited text with a header row
    ///
    /// Blank lines between records are skipped. A record with a field
    /// count different from the header fails with a `CsvParse` error
    /// naming the offending row. Fields may be double-quoted; a doubled
    /// quote inside a quoted field is an escaped quote, and a quoted
    /// field may span line breaks. Unquoted fields are whitespace-trimmed;
    /// quoted fields keep their content exactly.
    pub fn parse(text: &str, delimiter: char) -> Result<Self> {
        let mut records = parse_records(text, delimiter)?.into_iter();

        let header = match records.next() {
            Some(fields) => fields,
            None => return Err(Error::csv_parse("missing header row")),
        };

        let mut rows = Vec::new();
        for (idx, fields) in records.enumerate() {
            if fields.len() != header.len() {
                return Err(Error::csv_parse(format!(
                    "row {idx} has {} fields, expected {}",
                    fields.len(),
                    header.len()
                )));
            }
            rows.push(fields);
        }

        Ok(Self { header, rows })
    }

    /// Column names in source order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Data rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of a named column
    ///
    /// Duplicate header names resolve to the first occurrence; later
    /// duplicates are unreachable by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// All cells of the column at `index`, in row order
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[index].as_str())
    }
}

/// Split delimited text into records of fields
///
/// One pass over the characters with quote state carried across line
/// breaks, so a quoted field containing `\n` stays one field of one
/// record. CRLF and LF both end a record outside quotes.
fn parse_records(text: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // Whether the current field contained a quote; such fields keep
    // their content verbatim instead of being trimmed
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    let finish_field = |current: &mut String, quoted: &mut bool, fields: &mut Vec<String>| {
        let field = if *quoted {
            current.clone()
        } else {
            current.trim().to_string()
        };
        fields.push(field);
        current.clear();
        *quoted = false;
    };

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
            quoted = true;
        } else if c == delimiter {
            finish_field(&mut current, &mut quoted, &mut fields);
        } else if c == '\n' || c == '\r' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            // Blank line: a single empty unquoted field is not a record
            if fields.is_empty() && !quoted && current.trim().is_empty() {
                current.clear();
                continue;
            }
            finish_field(&mut current, &mut quoted, &mut fields);
            records.push(std::mem::take(&mut fields));
        } else {
            current.push(c);
        }
    }

    if in_quotes {
        return Err(Error::csv_parse("unterminated quoted field"));
    }

    // Trailing record without a final newline
    if !fields.is_empty() || quoted || !current.trim().is_empty() {
        finish_field(&mut current, &mut quoted, &mut fields);
        records.push(fields);
    }

    Ok(records)
}
