//! Persistence and status store tests.
//!
//! Exercises the atomic writer and the reader's error classification against
//! real files in a temp directory.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, save_json, temp_path_for};
use crate::status_store::StatusStore;
use tokenhud_core::{CoreError, UsageSnapshot};

fn store_in(dir: &TempDir) -> StatusStore {
    StatusStore::new(dir.path().join("token_status.json"))
}

fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_load_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("record.json");

    let snapshot = UsageSnapshot::compute(50_000, 200_000);
    save_json(&file_path, &snapshot).await.unwrap();

    let loaded: UsageSnapshot = load_json(&file_path).await.unwrap();
    assert_eq!(loaded, snapshot);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("record.json");

    let data = serde_json::json!({"key": "value"});

    save_json(&nested_path, &data).await.unwrap();
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_save_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("record.json");

    save_json(&file_path, &serde_json::json!({"a": 1})).await.unwrap();
    save_json(&file_path, &serde_json::json!({"a": 2})).await.unwrap();

    assert_eq!(dir_entries(temp_dir.path()), vec!["record.json".to_string()]);
}

#[tokio::test]
async fn test_failed_replace_cleans_up_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    // A directory at the target path makes the rename fail
    let target = temp_dir.path().join("record.json");
    std::fs::create_dir(&target).unwrap();

    let result = save_json(&target, &serde_json::json!({"a": 1})).await;
    assert!(result.is_err());
    assert_eq!(dir_entries(temp_dir.path()), vec!["record.json".to_string()]);
}

#[test]
fn test_temp_path_is_unique_per_call() {
    let target = std::path::Path::new("/data/token_status.json");
    let first = temp_path_for(target);
    let second = temp_path_for(target);
    assert_ne!(first, second);
    assert_eq!(first.parent(), second.parent());
}

#[tokio::test]
async fn test_concurrent_saves_do_not_collide() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("record.json");
    let first = UsageSnapshot::compute(10_000, 200_000);
    let second = UsageSnapshot::compute(20_000, 200_000);

    let (a, b) = tokio::join!(save_json(&file_path, &first), save_json(&file_path, &second));
    a.unwrap();
    b.unwrap();

    let loaded: UsageSnapshot = load_json(&file_path).await.unwrap();
    assert!(loaded == first || loaded == second);
    assert_eq!(dir_entries(temp_dir.path()), vec!["record.json".to_string()]);
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/record.json");

    let result: Result<UsageSnapshot, _> = load_json(&file_path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("test_dir");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.is_dir());
}

// ============================================================================
// Status Store Writer Tests
// ============================================================================

#[tokio::test]
async fn test_write_snapshot_contents() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let snapshot = store.write_snapshot(180_000, 200_000).await.unwrap();
    assert_eq!(snapshot.remaining, 20_000);

    let content = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["used"], 180_000);
    assert_eq!(value["total"], 200_000);
    assert_eq!(value["remaining"], 20_000);
    assert_eq!(value["percentage"], 10.0);
}

#[tokio::test]
async fn test_write_is_byte_identical_when_repeated() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.write_snapshot(25_000, 200_000).await.unwrap();
    let first = std::fs::read(store.path()).unwrap();
    store.write_snapshot(25_000, 200_000).await.unwrap();
    let second = std::fs::read(store.path()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_last_write_wins() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    store.write_snapshot(1, 200_000).await.unwrap();
    store.write_snapshot(2, 1_000).await.unwrap();

    let loaded = store.load_snapshot().await.unwrap();
    assert_eq!(loaded, UsageSnapshot::compute(2, 1_000));
}

#[tokio::test]
async fn test_write_over_budget() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let snapshot = store.write_snapshot(250_000, 200_000).await.unwrap();
    assert_eq!(snapshot.remaining, -50_000);
    assert_eq!(store.load_snapshot().await.unwrap().remaining, -50_000);
}

#[tokio::test]
async fn test_invalid_total_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.write_snapshot(10, 100).await.unwrap();
    let before = std::fs::read(store.path()).unwrap();

    let result = store.write_snapshot(10, 0).await;
    assert!(matches!(
        result,
        Err(StoreError::Core(CoreError::InvalidArgument(_)))
    ));
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

// ============================================================================
// Status Store Reader Tests
// ============================================================================

#[tokio::test]
async fn test_load_missing_is_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let result = store.load().await;
    assert!(matches!(result, Err(StoreError::StoreUnavailable { .. })));
}

#[tokio::test]
async fn test_load_garbage_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), "{\"used\": 12").unwrap();

    let result = store.load().await;
    assert!(matches!(result, Err(StoreError::StoreMalformed { .. })));
}

#[tokio::test]
async fn test_load_wrong_type_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), r#"{"used": "many"}"#).unwrap();

    let result = store.load().await;
    assert!(matches!(result, Err(StoreError::StoreMalformed { .. })));
}

#[tokio::test]
async fn test_load_array_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), "[1, 2, 3, 4]").unwrap();

    let result = store.load().await;
    assert!(matches!(result, Err(StoreError::StoreMalformed { .. })));
}

#[tokio::test]
async fn test_load_partial_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), r#"{"used": 5000}"#).unwrap();

    let patch = store.load().await.unwrap();
    assert_eq!(patch.used, Some(5000));
    assert!(patch.total.is_none());

    // Missing fields come from the boot snapshot
    let snapshot = store.load_snapshot().await.unwrap();
    assert_eq!(snapshot.used, 5000);
    assert_eq!(snapshot.total, 200_000);
    assert_eq!(snapshot.remaining, 200_000);
}
