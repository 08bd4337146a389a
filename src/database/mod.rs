//! Relational sink and managed tables
//!
//! A DuckDB-backed engine with two roles: egress of typed tables into an
//! attached PostgreSQL/MySQL/SQLite database, and a managed table registry
//! on the in-memory engine for save/read/drop by name.

mod engine;

pub use engine::SqlSink;

#[cfg(test)]
mod tests;
