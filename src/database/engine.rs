//! DuckDB-based relational sink
//!
//! External databases are reached through DuckDB extensions; the in-memory
//! engine doubles as the managed table registry. All SQL is built as
//! strings with literal escaping, so a sink needs no per-backend driver.

use crate::config::RunDate;
use crate::error::{Error, Result};
use crate::secrets::SqlCredentials;
use crate::table::{Cell, Column, ColumnSpec, TypedTable};
use crate::types::{DbKind, ScalarType, WriteMode};
use duckdb::Connection;

/// Rows per INSERT statement when appending
const INSERT_BATCH_ROWS: usize = 500;

/// Relational sink over a DuckDB connection
pub struct SqlSink {
    /// DuckDB connection
    conn: Connection,
    /// Attached database flavor, if any
    kind: DbKind,
    /// Whether an external database is attached as `sink_db`
    attached: bool,
}

impl SqlSink {
    /// Create an in-memory engine with no external database attached
    ///
    /// This is the managed table registry: `save_as_table`, `read_table`
    /// and `drop_table` operate on it directly.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to create DuckDB connection: {e}")))?;
        Ok(Self {
            conn,
            kind: DbKind::Duckdb,
            attached: false,
        })
    }

    /// Connect to an external database using secret-store credentials
    pub fn connect(kind: DbKind, credentials: &SqlCredentials, port: Option<u16>) -> Result<Self> {
        let connection_string = build_connection_string(kind, credentials, port);
        Self::connect_with_string(kind, &connection_string)
    }

    /// Connect to an external database from a raw connection string
    pub fn connect_with_string(kind: DbKind, connection_string: &str) -> Result<Self> {
        let mut sink = Self::in_memory()?;
        sink.kind = kind;
        sink.attach(connection_string)?;
        sink.attached = true;
        Ok(sink)
    }

    /// Attach the external database as `sink_db`
    fn attach(&self, connection_string: &str) -> Result<()> {
        let (extension, attach_type) = match self.kind {
            DbKind::Postgres => (Some("postgres"), "TYPE POSTGRES"),
            DbKind::Mysql => (Some("mysql"), "TYPE MYSQL"),
            DbKind::Sqlite => (Some("sqlite"), "TYPE SQLITE"),
            DbKind::Duckdb => (None, ""),
        };

        if let Some(ext) = extension {
            self.conn
                .execute_batch(&format!("INSTALL {ext}; LOAD {ext};"))
                .map_err(|e| Error::database(format!("Failed to load {ext} extension: {e}")))?;
        }

        let attach_sql = if attach_type.is_empty() {
            format!("ATTACH '{connection_string}' AS sink_db;")
        } else {
            format!("ATTACH '{connection_string}' AS sink_db ({attach_type});")
        };
        self.conn
            .execute_batch(&attach_sql)
            .map_err(|e| Error::database(format!("Failed to attach database: {e}")))?;

        Ok(())
    }

    /// Test the connection
    pub fn check_connection(&self) -> Result<()> {
        let query = if self.attached {
            match self.kind {
                DbKind::Postgres => "SELECT 1 FROM sink_db.pg_catalog.pg_tables LIMIT 1",
                DbKind::Mysql => "SELECT 1 FROM sink_db.information_schema.tables LIMIT 1",
                DbKind::Sqlite => "SELECT 1 FROM sink_db.sqlite_master LIMIT 1",
                DbKind::Duckdb => "SELECT 1",
            }
        } else {
            "SELECT 1"
        };

        self.conn
            .execute(query, [])
            .map_err(|e| Error::database(format!("Connection check failed: {e}")))?;
        Ok(())
    }

    /// Fully qualified name for a target table
    fn qualify(&self, table: &str) -> String {
        if !self.attached {
            return table.to_string();
        }
        if table.contains('.') {
            format!("sink_db.{table}")
        } else {
            match self.kind {
                // Default to the public schema for postgres
                DbKind::Postgres => format!("sink_db.public.{table}"),
                _ => format!("sink_db.{table}"),
            }
        }
    }

    /// Whether a table exists
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let bare = table.rsplit('.').next().unwrap_or(table);
        let catalog = if self.attached { "sink_db" } else { "memory" };
        let query = format!(
            "SELECT count(*) FROM information_schema.tables \
             WHERE table_catalog = '{catalog}' AND table_name = '{}'",
            escape_str(bare)
        );

        let count: i64 = self
            .conn
            .query_row(&query, [], |row| row.get(0))
            .map_err(|e| Error::database(format!("Failed to query tables: {e}")))?;
        Ok(count > 0)
    }

    /// Append every row of `table` to the target, creating it when absent
    pub fn append(&self, target: &str, table: &TypedTable) -> Result<usize> {
        let qualified = self.qualify(target);
        self.create_table_if_absent(&qualified, &table.schema())?;
        self.insert_rows(&qualified, table)?;
        tracing::info!(
            "Appended {} row(s) to {qualified}",
            table.row_count()
        );
        Ok(table.row_count())
    }

    /// Delete rows whose date column equals the run date
    ///
    /// The idempotent daily-load companion to `append`: delete the day's
    /// rows, then append the fresh ones. The date renders in compact
    /// `YYYYMMDD` form.
    pub fn delete_where_date(&self, target: &str, date_column: &str, date: &RunDate) -> Result<usize> {
        let qualified = self.qualify(target);
        let sql = format!(
            "DELETE FROM {qualified} WHERE {date_column} = '{}'",
            date.compact()
        );
        let deleted = self
            .conn
            .execute(&sql, [])
            .map_err(|e| Error::database(format!("Delete failed: {e}")))?;
        tracing::info!("Deleted {deleted} row(s) from {qualified} for {}", date.compact());
        Ok(deleted)
    }

    /// Save a typed table under a registry name
    ///
    /// `Overwrite` replaces any existing table of that name; `Append` adds
    /// rows to it (creating it first when absent).
    pub fn save_as_table(&self, name: &str, table: &TypedTable, mode: WriteMode) -> Result<()> {
        let qualified = self.qualify(name);
        if mode == WriteMode::Overwrite {
            self.conn
                .execute_batch(&format!("DROP TABLE IF EXISTS {qualified};"))
                .map_err(|e| Error::database(format!("Failed to drop {qualified}: {e}")))?;
        }
        self.create_table_if_absent(&qualified, &table.schema())?;
        self.insert_rows(&qualified, table)?;
        Ok(())
    }

    /// Read a registry table back as a typed table
    ///
    /// Fails if any column has a type outside the supported scalar set, or
    /// if a cell is NULL.
    pub fn read_table(&self, name: &str) -> Result<TypedTable> {
        let qualified = self.qualify(name);
        let schema = self.describe(&qualified)?;

        let select_list = schema
            .iter()
            .map(|def| def.name.clone())
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {select_list} FROM {qualified}"))
            .map_err(|e| Error::database(format!("Failed to prepare read: {e}")))?;

        let mut names = Vec::with_capacity(schema.len());
        let mut columns = Vec::with_capacity(schema.len());
        for def in schema.iter() {
            names.push(def.name.clone());
            columns.push(match def.scalar_type {
                ScalarType::Text => Column::Text(Vec::new()),
                ScalarType::Integer => Column::Integer(Vec::new()),
                ScalarType::Float32 => Column::Float32(Vec::new()),
                ScalarType::Float64 => Column::Float64(Vec::new()),
            });
        }

        let mut rows = stmt
            .query([])
            .map_err(|e| Error::database(format!("Failed to read {qualified}: {e}")))?;
        while let Some(row) = rows
            .next()
            .map_err(|e| Error::database(format!("Failed to read row: {e}")))?
        {
            for (i, column) in columns.iter_mut().enumerate() {
                let cell_err =
                    |e: duckdb::Error| Error::database(format!("Column {}: {e}", names[i]));
                match column {
                    Column::Text(v) => v.push(row.get::<_, String>(i).map_err(cell_err)?),
                    Column::Integer(v) => v.push(row.get::<_, i64>(i).map_err(cell_err)?),
                    Column::Float32(v) => v.push(row.get::<_, f32>(i).map_err(cell_err)?),
                    Column::Float64(v) => v.push(row.get::<_, f64>(i).map_err(cell_err)?),
                }
            }
        }

        Ok(TypedTable::from_parts(names, columns))
    }

    /// Drop a registry table
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let qualified = self.qualify(name);
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {qualified};"))
            .map_err(|e| Error::database(format!("Failed to drop {qualified}: {e}")))?;
        Ok(())
    }

    /// Map a table's DuckDB column types to the scalar set
    fn describe(&self, qualified: &str) -> Result<ColumnSpec> {
        let mut stmt = self
            .conn
            .prepare(&format!("DESCRIBE {qualified}"))
            .map_err(|e| Error::database(format!("Failed to describe {qualified}: {e}")))?;

        let described = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| Error::database(format!("Failed to describe {qualified}: {e}")))?;

        let mut spec = ColumnSpec::new();
        for entry in described {
            let (name, db_type) =
                entry.map_err(|e| Error::database(format!("Failed to describe: {e}")))?;
            let scalar = scalar_from_db_type(&db_type).ok_or_else(|| {
                Error::database(format!(
                    "Column '{name}' has unsupported type {db_type}"
                ))
            })?;
            spec = spec.with(&name, scalar);
        }
        Ok(spec)
    }

    /// Create the target table from a schema when it does not exist
    fn create_table_if_absent(&self, qualified: &str, schema: &ColumnSpec) -> Result<()> {
        let column_list = schema
            .iter()
            .map(|def| format!("{} {}", def.name, sql_type(def.scalar_type)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("CREATE TABLE IF NOT EXISTS {qualified} ({column_list});");
        self.conn
            .execute_batch(&sql)
            .map_err(|e| Error::database(format!("Failed to create {qualified}: {e}")))?;
        Ok(())
    }

    /// Insert all rows in batched multi-row VALUES statements
    fn insert_rows(&self, qualified: &str, table: &TypedTable) -> Result<()> {
        if table.row_count() == 0 {
            return Ok(());
        }

        let column_list = table.names().join(", ");
        let mut start = 0;
        while start < table.row_count() {
            let end = (start + INSERT_BATCH_ROWS).min(table.row_count());
            let values = (start..end)
                .map(|row| {
                    let literals = table
                        .row(row)
                        .into_iter()
                        .map(|cell| sql_literal(&cell))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("({literals})")
                })
                .collect::<Vec<_>>()
                .join(", ");

            let sql = format!("INSERT INTO {qualified} ({column_list}) VALUES {values};");
            self.conn
                .execute_batch(&sql)
                .map_err(|e| Error::database(format!("Insert into {qualified} failed: {e}")))?;
            start = end;
        }
        Ok(())
    }
}

/// Build a connection string from credentials
fn build_connection_string(kind: DbKind, credentials: &SqlCredentials, port: Option<u16>) -> String {
    let port = port.unwrap_or(match kind {
        DbKind::Postgres => 5432,
        DbKind::Mysql => 3306,
        DbKind::Sqlite | DbKind::Duckdb => 0,
    });

    match kind {
        DbKind::Postgres => format!(
            "postgresql://{}:{}@{}:{port}/{}",
            credentials.user, credentials.password, credentials.host, credentials.database
        ),
        DbKind::Mysql => format!(
            "mysql://{}:{}@{}:{port}/{}",
            credentials.user, credentials.password, credentials.host, credentials.database
        ),
        // SQLite and native DuckDB use the database field as a file path
        DbKind::Sqlite | DbKind::Duckdb => credentials.database.clone(),
    }
}

/// SQL column type for a scalar type
fn sql_type(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::Text => "VARCHAR",
        ScalarType::Integer => "BIGINT",
        ScalarType::Float32 => "FLOAT",
        ScalarType::Float64 => "DOUBLE",
    }
}

/// Scalar type for a DuckDB column type name
fn scalar_from_db_type(db_type: &str) -> Option<ScalarType> {
    match db_type.to_ascii_uppercase().as_str() {
        "VARCHAR" | "TEXT" | "STRING" => Some(ScalarType::Text),
        "BIGINT" | "INTEGER" | "INT" | "SMALLINT" | "TINYINT" => Some(ScalarType::Integer),
        "FLOAT" | "REAL" => Some(ScalarType::Float32),
        "DOUBLE" => Some(ScalarType::Float64),
        _ => None,
    }
}

/// Render a cell as a SQL literal
fn sql_literal(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Text(s) => format!("'{}'", escape_str(s)),
        Cell::Integer(i) => i.to_string(),
        Cell::Float32(v) => {
            if v.is_finite() {
                format!("{v}")
            } else {
                format!("'{v}'::FLOAT")
            }
        }
        Cell::Float64(v) => {
            if v.is_finite() {
                format!("{v}")
            } else {
                format!("'{v}'::DOUBLE")
            }
        }
    }
}

/// Escape a string for embedding in a single-quoted SQL literal
fn escape_str(s: &str) -> String {
    s.replace('\'', "''")
}
