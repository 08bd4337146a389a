//! Secret store implementations

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Capability for resolving credentials by (scope, key)
pub trait SecretStore {
    /// Fetch the secret at `scope`/`key`, failing with `SecretNotFound`
    /// when absent
    fn get(&self, scope: &str, key: &str) -> Result<String>;
}

/// Secret store over process environment variables
///
/// `get("sql", "dbuser")` resolves `TABLEFLOW_SECRET_SQL_DBUSER`; scope and
/// key are uppercased and non-alphanumeric characters map to `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    /// Create a new environment-backed store
    pub fn new() -> Self {
        Self
    }

    /// The environment variable name for a (scope, key) pair
    pub fn var_name(scope: &str, key: &str) -> String {
        format!(
            "TABLEFLOW_SECRET_{}_{}",
            sanitize(scope),
            sanitize(key)
        )
    }
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

impl SecretStore for EnvSecretStore {
    fn get(&self, scope: &str, key: &str) -> Result<String> {
        std::env::var(Self::var_name(scope, key))
            .map_err(|_| Error::secret_not_found(scope, key))
    }
}

/// In-memory secret store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    secrets: HashMap<(String, String), String>,
}

impl MemorySecretStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a secret, returning self for chaining
    #[must_use]
    pub fn with(mut self, scope: &str, key: &str, value: &str) -> Self {
        self.secrets
            .insert((scope.to_string(), key.to_string()), value.to_string());
        self
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, scope: &str, key: &str) -> Result<String> {
        self.secrets
            .get(&(scope.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| Error::secret_not_found(scope, key))
    }
}

/// Relational database credentials resolved from a secret store
///
/// Key names match the conventional scope layout: `dbhost`, `dbname`,
/// `dbuser`, `dbpasswd`.
#[derive(Debug, Clone)]
pub struct SqlCredentials {
    /// Database host (or full connection URL, backend-dependent)
    pub host: String,
    /// Database name
    pub database: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
}

impl SqlCredentials {
    /// Fetch all four credentials from `store` under `scope`
    pub fn from_store(store: &dyn SecretStore, scope: &str) -> Result<Self> {
        Ok(Self {
            host: store.get(scope, "dbhost")?,
            database: store.get(scope, "dbname")?,
            user: store.get(scope, "dbuser")?,
            password: store.get(scope, "dbpasswd")?,
        })
    }
}
