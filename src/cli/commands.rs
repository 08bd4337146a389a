//! CLI commands and argument parsing

use crate::config::RunDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tableflow CLI
#[derive(Parser, Debug)]
#[command(name = "tableflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse, cast and preview a delimited source
    Load {
        /// Source path (within the mount when --mount is given)
        #[arg(short, long)]
        source: String,

        /// Column spec file (YAML, or JSON by extension)
        #[arg(long)]
        spec: PathBuf,

        /// Storage mount URL (s3://, gs://, az://, or a local directory)
        #[arg(short, long)]
        mount: Option<String>,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Preview at most this many rows
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Load a source and serialize it to a destination mount
    Write {
        /// Source path (within the mount when --mount is given)
        #[arg(short, long)]
        source: String,

        /// Column spec file (YAML, or JSON by extension)
        #[arg(long)]
        spec: PathBuf,

        /// Source storage mount URL
        #[arg(short, long)]
        mount: Option<String>,

        /// Field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Destination mount URL
        #[arg(long)]
        dest: String,

        /// Object path within the destination mount
        #[arg(long)]
        path: String,
    },

    /// List objects under a storage mount
    Ls {
        /// Mount URL
        url: String,

        /// Prefix within the mount
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Execute a YAML job end to end
    Run {
        /// Job definition file
        #[arg(short, long)]
        job: PathBuf,

        /// Run date (YYYY-MM-DD or YYYYMMDD); defaults to today
        #[arg(long)]
        date: Option<RunDate>,
    },

    /// Check a job file without touching data
    Validate {
        /// Job definition file
        #[arg(short, long)]
        job: PathBuf,
    },
}
