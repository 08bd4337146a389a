//! Secret store access
//!
//! Credentials are looked up by (scope, key) through the narrow
//! [`SecretStore`] capability, so callers choose the backing without the
//! write paths knowing about it. Two implementations ship here: one over
//! environment variables and one over an in-memory map for tests and
//! embedding.

mod store;

pub use store::{EnvSecretStore, MemorySecretStore, SecretStore, SqlCredentials};
