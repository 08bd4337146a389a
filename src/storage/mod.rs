//! Mounted object storage
//!
//! A [`StorageMount`] stands in for a platform mount point: one URL
//! (cloud bucket or local directory) behind a uniform list/read/put/remove
//! surface. Credentials come from the environment the way the underlying
//! `object_store` builders read it; this crate adds no auth layer of its
//! own.

mod mount;

pub use mount::StorageMount;

#[cfg(test)]
mod tests;
