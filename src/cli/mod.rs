//! CLI module
//!
//! Command-line interface for loading and moving typed tables.
//!
//! # Commands
//!
//! - `load` - Parse, cast and preview a delimited source
//! - `write` - Load a source and serialize it to a destination
//! - `ls` - List objects under a storage mount
//! - `run` - Execute a YAML job end to end
//! - `validate` - Check a job file without touching data

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
