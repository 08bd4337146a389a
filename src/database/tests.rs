//! SQL sink tests against the in-memory engine

use super::SqlSink;
use crate::config::RunDate;
use crate::table::{load_str, ColumnSpec};
use crate::types::{ScalarType, WriteMode};
use pretty_assertions::assert_eq;

fn sample() -> crate::table::TypedTable {
    let source = "date,name,amount\n20260827,alpha,1.5\n20260827,beta,2.5\n";
    let spec = ColumnSpec::new()
        .with("date", ScalarType::Text)
        .with("name", ScalarType::Text)
        .with("amount", ScalarType::Float64);
    load_str(source, &spec, ',').unwrap()
}

#[test]
fn test_check_connection() {
    let sink = SqlSink::in_memory().unwrap();
    sink.check_connection().unwrap();
}

#[test]
fn test_save_and_read_round_trip() {
    let sink = SqlSink::in_memory().unwrap();
    let table = sample();

    sink.save_as_table("daily_sales", &table, WriteMode::Overwrite).unwrap();
    assert!(sink.table_exists("daily_sales").unwrap());

    let back = sink.read_table("daily_sales").unwrap();
    assert_eq!(back, table);
}

#[test]
fn test_save_overwrite_replaces() {
    let sink = SqlSink::in_memory().unwrap();
    let table = sample();

    sink.save_as_table("t", &table, WriteMode::Overwrite).unwrap();
    sink.save_as_table("t", &table, WriteMode::Overwrite).unwrap();
    assert_eq!(sink.read_table("t").unwrap().row_count(), 2);
}

#[test]
fn test_save_append_accumulates() {
    let sink = SqlSink::in_memory().unwrap();
    let table = sample();

    sink.save_as_table("t", &table, WriteMode::Append).unwrap();
    sink.save_as_table("t", &table, WriteMode::Append).unwrap();
    assert_eq!(sink.read_table("t").unwrap().row_count(), 4);
}

#[test]
fn test_drop_table() {
    let sink = SqlSink::in_memory().unwrap();
    sink.save_as_table("t", &sample(), WriteMode::Overwrite).unwrap();
    sink.drop_table("t").unwrap();
    assert!(!sink.table_exists("t").unwrap());

    // Dropping a missing table is not an error
    sink.drop_table("t").unwrap();
}

#[test]
fn test_delete_then_append_is_idempotent() {
    let sink = SqlSink::in_memory().unwrap();
    let table = sample();
    let date = RunDate::new(2026, 8, 27).unwrap();

    // Two runs of the daily load leave exactly one day's rows
    for run in 0..2 {
        let deleted = sink.delete_where_date("sales", "date", &date).unwrap_or(0);
        if run == 1 {
            assert_eq!(deleted, 2);
        }
        sink.append("sales", &table).unwrap();
    }
    let back = sink.read_table("sales").unwrap();
    assert_eq!(back.row_count(), 2);
}

#[test]
fn test_append_creates_table() {
    let sink = SqlSink::in_memory().unwrap();
    let appended = sink.append("fresh", &sample()).unwrap();
    assert_eq!(appended, 2);
    assert!(sink.table_exists("fresh").unwrap());
}

#[test]
fn test_append_empty_table_creates_schema_only() {
    let sink = SqlSink::in_memory().unwrap();
    let spec = ColumnSpec::new()
        .with("id", ScalarType::Integer)
        .with("score", ScalarType::Float32);
    let empty = load_str("id,score\n", &spec, ',').unwrap();

    assert_eq!(sink.append("empty_t", &empty).unwrap(), 0);
    let back = sink.read_table("empty_t").unwrap();
    assert_eq!(back.row_count(), 0);
    assert_eq!(back.schema(), spec);
}

#[test]
fn test_text_with_quotes_survives() {
    let sink = SqlSink::in_memory().unwrap();
    let spec = ColumnSpec::new().with("label", ScalarType::Text);
    let table = load_str("label\nit's quoted\n", &spec, ',').unwrap();

    sink.save_as_table("q", &table, WriteMode::Overwrite).unwrap();
    let back = sink.read_table("q").unwrap();
    assert_eq!(
        back.column("label").unwrap().as_text().unwrap(),
        &["it's quoted".to_string()]
    );
}
