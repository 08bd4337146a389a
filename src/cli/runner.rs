//! Command dispatch

use super::commands::{Cli, Commands};
use crate::config::{JobConfig, RunDate};
use crate::database::SqlSink;
use crate::error::Result;
use crate::secrets::{EnvSecretStore, SqlCredentials};
use crate::storage::StorageMount;
use crate::table::{load_path, ColumnSpec, TypedTable};
use crate::types::DbKind;
use std::path::Path;

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Load {
                source,
                spec,
                mount,
                delimiter,
                limit,
            } => {
                let table = load_source(mount.as_deref(), source, spec, *delimiter).await?;
                preview(&table, *limit);
                Ok(())
            }

            Commands::Write {
                source,
                spec,
                mount,
                delimiter,
                dest,
                path,
            } => {
                let table = load_source(mount.as_deref(), source, spec, *delimiter).await?;
                let destination = StorageMount::mount(dest)?;
                let written = destination.write_csv(path, &table).await?;
                println!("Wrote {} row(s) to {written}", table.row_count());
                Ok(())
            }

            Commands::Ls { url, prefix } => {
                let mount = StorageMount::mount(url)?;
                for object in mount.list(prefix).await? {
                    println!("{object}");
                }
                Ok(())
            }

            Commands::Run { job, date } => {
                let config = JobConfig::from_path(job)?;
                let date = (*date).unwrap_or_else(RunDate::today);
                run_job(&config, &date).await
            }

            Commands::Validate { job } => {
                let config = JobConfig::from_path(job)?;
                println!(
                    "OK: {} column(s), destination: {}, table: {}, sql: {}",
                    config.columns.len(),
                    config.destination.is_some(),
                    config.table.is_some(),
                    config.sql.is_some()
                );
                Ok(())
            }
        }
    }
}

/// Load a typed table from a local path or through a mount
async fn load_source(
    mount: Option<&str>,
    source: &str,
    spec_path: &Path,
    delimiter: char,
) -> Result<TypedTable> {
    let spec = ColumnSpec::from_path(spec_path)?;
    match mount {
        Some(url) => {
            let mount = StorageMount::mount(url)?;
            mount.load_table(source, &spec, delimiter).await
        }
        None => load_path(source, &spec, delimiter),
    }
}

/// Print a table's schema and the first `limit` rows
fn preview(table: &TypedTable, limit: usize) {
    let schema: Vec<String> = table
        .schema()
        .iter()
        .map(|def| format!("{}: {}", def.name, def.scalar_type))
        .collect();
    println!("schema: {}", schema.join(", "));
    println!("rows: {}", table.row_count());

    for row in 0..table.row_count().min(limit) {
        let cells: Vec<String> = table.row(row).iter().map(ToString::to_string).collect();
        println!("{}", cells.join(" | "));
    }
}

/// Execute a job: load once, then fan out to every configured target
async fn run_job(config: &JobConfig, date: &RunDate) -> Result<()> {
    tracing::info!("Running job for {date}");

    let mount_url = config.mount.as_deref().unwrap_or(".");
    let mount = StorageMount::mount(mount_url)?;
    let table = mount
        .load_table(&config.source, &config.columns, config.delimiter)
        .await?;
    tracing::info!(
        "Loaded {} row(s) x {} column(s) from {}",
        table.row_count(),
        table.column_count(),
        config.source
    );

    if let Some(dest) = &config.destination {
        let destination = StorageMount::mount(&dest.mount)?;
        destination.write_csv(&dest.path, &table).await?;
    }

    if let Some(managed) = &config.table {
        let sink = match &managed.registry {
            Some(path) => SqlSink::connect_with_string(DbKind::Duckdb, path)?,
            None => SqlSink::in_memory()?,
        };
        sink.save_as_table(&managed.name, &table, managed.mode)?;
        tracing::info!("Saved managed table {}", managed.name);
    }

    if let Some(sql) = &config.sql {
        let credentials = SqlCredentials::from_store(&EnvSecretStore::new(), &sql.scope)?;
        let sink = SqlSink::connect(sql.kind, &credentials, sql.port)?;
        sink.check_connection()?;
        if let Some(date_column) = &sql.date_column {
            sink.delete_where_date(&sql.table, date_column, date)?;
        }
        sink.append(&sql.table, &table)?;
    }

    Ok(())
}
