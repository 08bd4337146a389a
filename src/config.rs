//! Run configuration
//!
//! Explicit, structured run parameters: a validated calendar date in place
//! of interactive date widgets, and a YAML job definition describing one
//! ingest/egress run end to end.

use crate::error::{Error, Result};
use crate::table::ColumnSpec;
use crate::types::{DbKind, WriteMode};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// Run Date
// ============================================================================

/// The date a run operates on
///
/// Carries the three fields explicitly and is validated against the civil
/// calendar on construction, so no invalid date can flow into a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RunDateRepr", into = "RunDateRepr")]
pub struct RunDate {
    year: i32,
    month: u32,
    day: u32,
}

/// Serde representation of a run date: the three fields, or a string in
/// `YYYY-MM-DD` or `YYYYMMDD` form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RunDateRepr {
    Text(String),
    Fields { year: i32, month: u32, day: u32 },
}

impl TryFrom<RunDateRepr> for RunDate {
    type Error = Error;

    fn try_from(repr: RunDateRepr) -> Result<Self> {
        match repr {
            RunDateRepr::Text(s) => s.parse(),
            RunDateRepr::Fields { year, month, day } => RunDate::new(year, month, day),
        }
    }
}

impl From<RunDate> for RunDateRepr {
    fn from(date: RunDate) -> Self {
        RunDateRepr::Fields {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}

impl RunDate {
    /// Create a validated run date
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| Error::invalid_date(format!("{year}-{month}-{day} is not a calendar date")))?;
        Ok(Self { year, month, day })
    }

    /// Today's date in UTC
    pub fn today() -> Self {
        let now = chrono::Utc::now().date_naive();
        Self {
            year: now.year(),
            month: now.month(),
            day: now.day(),
        }
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day component (1-31)
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Compact `YYYYMMDD` rendering, used for date-keyed sink rows
    pub fn compact(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl std::fmt::Display for RunDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for RunDate {
    type Err = Error;

    /// Parse `YYYY-MM-DD` or compact `YYYYMMDD`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parsed = if s.contains('-') {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
        } else {
            NaiveDate::parse_from_str(s, "%Y%m%d")
        };
        let date = parsed.map_err(|_| {
            Error::invalid_date(format!("{s:?} is not YYYY-MM-DD or YYYYMMDD"))
        })?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }
}

impl From<NaiveDate> for RunDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

// ============================================================================
// Job Config
// ============================================================================

fn default_delimiter() -> char {
    ','
}

/// Where a serialized table goes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationDef {
    /// Mount URL (cloud bucket or local directory)
    pub mount: String,
    /// Object path within the mount
    pub path: String,
}

/// Managed table target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedTableDef {
    /// Registry table name
    pub name: String,
    /// Overwrite or append
    #[serde(default)]
    pub mode: WriteMode,
    /// DuckDB file backing the registry; in-memory when absent
    #[serde(default)]
    pub registry: Option<String>,
}

/// Relational sink target, credentialed through the secret store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlSinkDef {
    /// Database flavor
    #[serde(default)]
    pub kind: DbKind,
    /// Secret-store scope holding dbhost/dbname/dbuser/dbpasswd
    pub scope: String,
    /// Target table name
    pub table: String,
    /// Date column for the delete-then-append daily load
    #[serde(default)]
    pub date_column: Option<String>,
    /// Port override
    #[serde(default)]
    pub port: Option<u16>,
}

/// One ingest/egress run, loadable from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Source mount URL; defaults to the current directory
    #[serde(default)]
    pub mount: Option<String>,
    /// Source object path within the mount
    pub source: String,
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Column projection and cast spec
    pub columns: ColumnSpec,
    /// Optional serialized-file destination
    #[serde(default)]
    pub destination: Option<DestinationDef>,
    /// Optional managed table target
    #[serde(default)]
    pub table: Option<ManagedTableDef>,
    /// Optional relational sink target
    #[serde(default)]
    pub sql: Option<SqlSinkDef>,
}

impl JobConfig {
    /// Load a job config from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load a job config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural requirements
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(Error::config("'source' must not be empty"));
        }
        if self.columns.is_empty() {
            return Err(Error::config("'columns' must declare at least one column"));
        }
        if let Some(sql) = &self.sql {
            if sql.scope.trim().is_empty() {
                return Err(Error::config("'sql.scope' must not be empty"));
            }
            if sql.table.trim().is_empty() {
                return Err(Error::config("'sql.table' must not be empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn test_run_date_valid() {
        let date = RunDate::new(2026, 8, 27).unwrap();
        assert_eq!(date.compact(), "20260827");
        assert_eq!(date.to_string(), "2026-08-27");
    }

    #[test]
    fn test_run_date_invalid() {
        assert!(RunDate::new(2026, 2, 30).is_err());
        assert!(RunDate::new(2026, 13, 1).is_err());
    }

    #[test]
    fn test_run_date_from_str() {
        assert_eq!("2026-08-27".parse::<RunDate>().unwrap(), RunDate::new(2026, 8, 27).unwrap());
        assert_eq!("20260827".parse::<RunDate>().unwrap(), RunDate::new(2026, 8, 27).unwrap());
        assert!("2026/08/27".parse::<RunDate>().is_err());
    }

    #[test]
    fn test_run_date_serde_forms() {
        let from_text: RunDate = serde_yaml::from_str("\"2026-08-27\"").unwrap();
        let from_fields: RunDate =
            serde_yaml::from_str("year: 2026\nmonth: 8\nday: 27\n").unwrap();
        assert_eq!(from_text, from_fields);
    }

    #[test]
    fn test_job_config_from_yaml() {
        let yaml = r"
source: ingest/file_1.csv
mount: /data
columns:
  - name: col1
    type: text
  - name: col2
    type: integer
destination:
  mount: /data
  path: out/result.csv
sql:
  kind: postgres
  scope: sql
  table: sales
  date_column: date
";
        let config = JobConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.sql.as_ref().unwrap().kind, DbKind::Postgres);
        assert_eq!(
            config.columns.iter().next().unwrap().scalar_type,
            ScalarType::Text
        );
    }

    #[test]
    fn test_job_config_rejects_empty_columns() {
        let yaml = "source: a.csv\ncolumns: []\n";
        assert!(JobConfig::from_yaml_str(yaml).is_err());
    }
}
