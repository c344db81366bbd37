use std::path::PathBuf;

use rusqlite::{params, Connection};
use tempfile::TempDir;
use wayfarer_core::{
    models::{ItineraryResult, Narrative},
    ErrorKind, ResultStore,
};

/// Helper function to create a temporary directory and store path
fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("nested").join("session.db");
    (temp_dir, path)
}

fn result(text: &str) -> ItineraryResult {
    ItineraryResult::new(Narrative::Text(text.to_string()))
}

#[tokio::test]
async fn test_new_store_is_empty_and_creates_parent_dirs() {
    let (_temp_dir, path) = create_test_environment();

    let store = ResultStore::open(&path).await.expect("Failed to open store");
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_put_overwrites_single_slot() {
    let (_temp_dir, path) = create_test_environment();
    let store = ResultStore::open(&path).await.unwrap();

    store.put(&result("First trip")).await.unwrap();
    store.put(&result("Second trip")).await.unwrap();

    let entry = store.entry().await.unwrap().expect("slot should be filled");
    assert_eq!(entry.result, result("Second trip"));

    let rows: i64 = Connection::open(&path)
        .unwrap()
        .query_row("SELECT COUNT(*) FROM itinerary_slot", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_result_survives_reopen() {
    let (_temp_dir, path) = create_test_environment();
    ResultStore::open(&path)
        .await
        .unwrap()
        .put(&result("Day 1: Kilkenny"))
        .await
        .unwrap();

    let reopened = ResultStore::open(&path).await.unwrap();
    assert_eq!(reopened.get().await.unwrap(), Some(result("Day 1: Kilkenny")));
}

#[tokio::test]
async fn test_clear_empties_slot() {
    let (_temp_dir, path) = create_test_environment();
    let store = ResultStore::open(&path).await.unwrap();

    assert!(!store.clear().await.unwrap());
    store.put(&result("Day 1: Louth")).await.unwrap();
    assert!(store.clear().await.unwrap());
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_undecodable_payload_reads_as_absent() {
    let (_temp_dir, path) = create_test_environment();
    let store = ResultStore::open(&path).await.unwrap();

    Connection::open(&path)
        .unwrap()
        .execute(
            "INSERT INTO itinerary_slot (id, payload, stored_at) VALUES (1, ?1, ?2)",
            params!["{not json", "2025-06-01T00:00:00Z"],
        )
        .unwrap();

    assert!(store.get().await.unwrap().is_none());

    // A later put replaces the broken row
    store.put(&result("Day 1: Meath")).await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some(result("Day 1: Meath")));
}

#[tokio::test]
async fn test_store_from_newer_schema_is_rejected() {
    let (_temp_dir, path) = create_test_environment();
    ResultStore::open(&path).await.unwrap();

    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 99")
        .unwrap();

    let err = ResultStore::open(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
