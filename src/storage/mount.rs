//! Storage mount backed by `object_store`

use crate::error::{Error, Result};
use crate::output::to_csv;
use crate::table::{load_str, ColumnSpec, TypedTable};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// A mounted storage location parsed from a URL
///
/// Supported formats:
/// - `s3://bucket/path/` - AWS S3
/// - `gs://bucket/path/` - Google Cloud Storage
/// - `az://container/path/` - Azure Blob Storage
/// - `/local/path/` or `file:///local/path/` - Local filesystem
#[derive(Debug, Clone)]
pub struct StorageMount {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl StorageMount {
    /// Mount a storage location from its URL
    pub fn mount(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::mount_s3(url)
        } else if url.starts_with("gs://") {
            Self::mount_gcs(url)
        } else if url.starts_with("az://") {
            Self::mount_azure(url)
        } else {
            Self::mount_local(url)
        }
    }

    /// Mount an S3 bucket
    fn mount_s3(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("s3://")
            .ok_or_else(|| Error::config(format!("Invalid s3 URL: {url}")))?;

        let (bucket, prefix) = split_bucket(without_scheme);

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create s3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    /// Mount a GCS bucket
    fn mount_gcs(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("gs://")
            .ok_or_else(|| Error::config(format!("Invalid GCS URL: {url}")))?;

        let (bucket, prefix) = split_bucket(without_scheme);

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    /// Mount an Azure Blob container
    fn mount_azure(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("az://")
            .ok_or_else(|| Error::config(format!("Invalid Azure URL: {url}")))?;

        let (container, prefix) = split_bucket(without_scheme);

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
        })
    }

    /// Mount a local directory
    fn mount_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud mount (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Resolve a relative path against the mount prefix
    fn resolve(&self, path: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(path)
        } else {
            ObjectPath::from(format!("{}/{path}", self.prefix.trim_end_matches('/')))
        }
    }

    /// List object paths under a prefix within the mount
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let prefix = if path.is_empty() && self.prefix.is_empty() {
            None
        } else {
            Some(self.resolve(path))
        };

        let objects: Vec<_> = self
            .store
            .list(prefix.as_ref())
            .try_collect()
            .await
            .map_err(Error::ObjectStore)?;

        Ok(objects.into_iter().map(|m| m.location.to_string()).collect())
    }

    /// Read an object's bytes
    pub async fn read(&self, path: &str) -> Result<Bytes> {
        let location = self.resolve(path);
        let result = self.store.get(&location).await?;
        Ok(result.bytes().await?)
    }

    /// Read an object as UTF-8 text
    pub async fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::config(format!("Object {path} is not valid UTF-8: {e}")))
    }

    /// Write bytes to an object, replacing any existing one
    pub async fn put(&self, path: &str, data: Bytes) -> Result<String> {
        let location = self.resolve(path);
        self.store.put(&location, data.into()).await?;

        let full_path = format!("{}://{location}", self.scheme);
        tracing::info!("Wrote {full_path}");
        Ok(full_path)
    }

    /// Remove an object
    pub async fn remove(&self, path: &str) -> Result<()> {
        let location = self.resolve(path);
        self.store.delete(&location).await?;
        Ok(())
    }

    /// Serialize a typed table as CSV and write it to the mount
    pub async fn write_csv(&self, path: &str, table: &TypedTable) -> Result<String> {
        let csv = to_csv(table);
        self.put(path, Bytes::from(csv)).await
    }

    /// Read a delimited object and load it through the typed table loader
    pub async fn load_table(
        &self,
        path: &str,
        spec: &ColumnSpec,
        delimiter: char,
    ) -> Result<TypedTable> {
        let text = self.read_to_string(path).await?;
        load_str(&text, spec, delimiter)
    }
}

/// Split `bucket/prefix` after the scheme
fn split_bucket(without_scheme: &str) -> (&str, String) {
    match without_scheme.find('/') {
        Some(idx) => (
            &without_scheme[..idx],
            without_scheme[idx + 1..].to_string(),
        ),
        None => (without_scheme, String::new()),
    }
}
