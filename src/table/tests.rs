//! Loader tests

use super::*;
use crate::error::Error;
use crate::types::ScalarType;
use pretty_assertions::assert_eq;
use test_case::test_case;

const SOURCE: &str = "col1,col2,col3\na,1,2.5\nb,2,3.5\n";

fn spec() -> ColumnSpec {
    ColumnSpec::new()
        .with("col1", ScalarType::Text)
        .with("col2", ScalarType::Integer)
        .with("col3", ScalarType::Float64)
}

#[test]
fn test_load_happy_path() {
    let table = load_str(SOURCE, &spec(), ',').unwrap();

    assert_eq!(table.names(), &["col1", "col2", "col3"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.column("col1").unwrap().as_text().unwrap(),
        &["a".to_string(), "b".to_string()]
    );
    assert_eq!(table.column("col2").unwrap().as_integer().unwrap(), &[1, 2]);
    assert_eq!(
        table.column("col3").unwrap().as_float64().unwrap(),
        &[2.5, 3.5]
    );
}

#[test]
fn test_schema_matches_spec_order() {
    // Spec order wins over source order
    let reordered = ColumnSpec::new()
        .with("col3", ScalarType::Float64)
        .with("col1", ScalarType::Text);
    let table = load_str(SOURCE, &reordered, ',').unwrap();

    assert_eq!(table.names(), &["col3", "col1"]);
    assert_eq!(table.schema(), reordered);
    assert!(table.column("col2").is_none());
}

#[test]
fn test_row_count_preserved() {
    let table = load_str(SOURCE, &spec(), ',').unwrap();
    let raw = RawTable::parse(SOURCE, ',').unwrap();
    assert_eq!(table.row_count(), raw.row_count());
}

#[test]
fn test_unknown_column() {
    let bad = ColumnSpec::new().with("col4", ScalarType::Text);
    match load_str(SOURCE, &bad, ',') {
        Err(Error::UnknownColumn { columns }) => assert_eq!(columns, vec!["col4".to_string()]),
        other => panic!("expected UnknownColumn, got {other:?}"),
    }
}

#[test]
fn test_unknown_column_names_all_missing() {
    let bad = ColumnSpec::new()
        .with("col1", ScalarType::Text)
        .with("col4", ScalarType::Text)
        .with("col5", ScalarType::Integer);
    match load_str(SOURCE, &bad, ',') {
        Err(Error::UnknownColumn { columns }) => {
            assert_eq!(columns, vec!["col4".to_string(), "col5".to_string()]);
        }
        other => panic!("expected UnknownColumn, got {other:?}"),
    }
}

#[test]
fn test_empty_spec() {
    assert!(matches!(
        load_str(SOURCE, &ColumnSpec::new(), ','),
        Err(Error::EmptySpec)
    ));
}

#[test]
fn test_cast_error_names_row_and_column() {
    let source = "col1,col2,col3\na,x,2.5\n";
    match load_str(source, &spec(), ',') {
        Err(Error::CastError { row, column, value, target }) => {
            assert_eq!(row, 0);
            assert_eq!(column, "col2");
            assert_eq!(value, "x");
            assert_eq!(target, ScalarType::Integer);
        }
        other => panic!("expected CastError, got {other:?}"),
    }
}

#[test]
fn test_cast_is_all_or_nothing() {
    // Bad cell in the last column of the last row still fails the load
    let source = "col1,col2,col3\na,1,2.5\nb,2,oops\n";
    assert!(load_str(source, &spec(), ',').is_err());
}

#[test]
fn test_header_only_source() {
    let table = load_str("col1,col2,col3\n", &spec(), ',').unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.names(), &["col1", "col2", "col3"]);
    assert_eq!(table.schema(), spec());
}

#[test]
fn test_load_is_idempotent() {
    let first = load_str(SOURCE, &spec(), ',').unwrap();
    let second = load_str(SOURCE, &spec(), ',').unwrap();
    assert_eq!(first, second);
}

#[test_case("42", 42; "plain")]
#[test_case("-7", -7; "negative")]
#[test_case(" 13 ", 13; "surrounding whitespace")]
fn test_integer_cast(cell: &str, expected: i64) {
    let source = format!("n\n{cell}\n");
    let spec = ColumnSpec::new().with("n", ScalarType::Integer);
    let table = load_str(&source, &spec, ',').unwrap();
    assert_eq!(table.column("n").unwrap().as_integer().unwrap(), &[expected]);
}

#[test_case("1.5e3"; "exponent")]
#[test_case("-0.25"; "negative")]
#[test_case("inf"; "infinity literal")]
#[test_case("NaN"; "nan literal")]
fn test_float_cast_accepts(cell: &str) {
    let source = format!("x\n{cell}\n");
    let spec = ColumnSpec::new().with("x", ScalarType::Float64);
    assert!(load_str(&source, &spec, ',').is_ok());
}

#[test_case("9223372036854775808"; "out of range integer")]
#[test_case("1.5"; "float is not an integer")]
#[test_case(""; "empty cell")]
fn test_integer_cast_rejects(cell: &str) {
    // Second column keeps the row non-blank when the cell is empty
    let source = format!("n,s\n{cell},x\n");
    let spec = ColumnSpec::new().with("n", ScalarType::Integer);
    assert!(matches!(
        load_str(&source, &spec, ','),
        Err(Error::CastError { .. })
    ));
}

#[test]
fn test_float32_cast() {
    let source = "x\n0.5\n";
    let spec = ColumnSpec::new().with("x", ScalarType::Float32);
    let table = load_str(source, &spec, ',').unwrap();
    assert_eq!(table.column("x").unwrap().as_float32().unwrap(), &[0.5f32]);
}

#[test]
fn test_duplicate_header_uses_first_occurrence() {
    let source = "a,a\nfirst,second\n";
    let spec = ColumnSpec::new().with("a", ScalarType::Text);
    let table = load_str(source, &spec, ',').unwrap();
    assert_eq!(
        table.column("a").unwrap().as_text().unwrap(),
        &["first".to_string()]
    );
}

#[test]
fn test_semicolon_delimiter() {
    let source = "a;b\n1;2\n";
    let spec = ColumnSpec::new()
        .with("a", ScalarType::Integer)
        .with("b", ScalarType::Integer);
    let table = load_str(source, &spec, ';').unwrap();
    assert_eq!(table.column("b").unwrap().as_integer().unwrap(), &[2]);
}
