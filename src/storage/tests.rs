//! Storage mount tests (local filesystem only)

use super::StorageMount;
use crate::table::{load_str, ColumnSpec};
use crate::types::ScalarType;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn local_mount() -> (TempDir, StorageMount) {
    let dir = TempDir::new().unwrap();
    let mount = StorageMount::mount(dir.path().to_str().unwrap()).unwrap();
    (dir, mount)
}

#[tokio::test]
async fn test_put_read_remove() {
    let (_dir, mount) = local_mount();
    assert!(!mount.is_cloud());
    assert_eq!(mount.scheme(), "file");

    mount.put("ingest/file_1.csv", Bytes::from("a,b\n1,2\n")).await.unwrap();
    assert_eq!(mount.read_to_string("ingest/file_1.csv").await.unwrap(), "a,b\n1,2\n");

    let listed = mount.list("ingest").await.unwrap();
    assert_eq!(listed, vec!["ingest/file_1.csv".to_string()]);

    mount.remove("ingest/file_1.csv").await.unwrap();
    assert!(mount.read("ingest/file_1.csv").await.is_err());
}

#[tokio::test]
async fn test_write_csv_and_load_table() {
    let (_dir, mount) = local_mount();
    let spec = ColumnSpec::new()
        .with("id", ScalarType::Integer)
        .with("score", ScalarType::Float64);
    let table = load_str("id,score\n1,0.5\n2,1.5\n", &spec, ',').unwrap();

    let written = mount.write_csv("out/result.csv", &table).await.unwrap();
    assert!(written.ends_with("out/result.csv"));

    let back = mount.load_table("out/result.csv", &spec, ',').await.unwrap();
    assert_eq!(back, table);
}

#[test]
fn test_mount_cloud_schemes_detected() {
    // Builders may fail without credentials in the environment, but the
    // scheme dispatch should never mistake a cloud URL for a local path.
    if let Ok(mount) = StorageMount::mount("s3://bucket/prefix") {
        assert!(mount.is_cloud());
        assert_eq!(mount.scheme(), "s3");
    }
}
