//! Tests for ProductFileStore
//!
//! These tests verify:
//! - Opening existing, missing, and corrupt files
//! - Id assignment (monotonic, never reused)
//! - get/find/update/delete semantics
//! - Whole-file persistence and reload
//! - Memory stays consistent with disk when a write fails
//! - Concurrent creates

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use estore::{EstoreError, InventoryStore, Product, ProductFileStore};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_products_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("products.json");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

fn setup_empty_store() -> (TempDir, ProductFileStore) {
    let (temp_dir, path) = setup_products_file("[]");
    let store = ProductFileStore::open(&path).unwrap();
    (temp_dir, store)
}

fn read_file(path: &Path) -> Vec<Product> {
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_empty_file() {
    let (_temp, store) = setup_empty_store();

    assert!(store.is_empty());
    assert_eq!(store.next_id(), 0);
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn test_open_existing_products() {
    let (_temp, path) = setup_products_file(
        r#"[
            {"id": 3, "name": "Soda", "price": 2.99, "quantity": 20},
            {"id": 1, "name": "Chips", "price": 1.5, "quantity": 4}
        ]"#,
    );

    let store = ProductFileStore::open(&path).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.next_id(), 4);

    let all = store.get_all().unwrap();
    assert_eq!(all[0], Product::new(1, "Chips", 1.5, 4));
    assert_eq!(all[1], Product::new(3, "Soda", 2.99, 20));
}

#[test]
fn test_open_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    let result = ProductFileStore::open(&path);

    assert!(matches!(result, Err(EstoreError::Io(_))));
}

#[test]
fn test_open_corrupt_file_fails() {
    let (_temp, path) = setup_products_file("{ not json ]");

    let result = ProductFileStore::open(&path);

    assert!(matches!(result, Err(EstoreError::Serialization(_))));
}

#[test]
fn test_open_duplicate_ids_fails() {
    let (_temp, path) = setup_products_file(
        r#"[
            {"id": 1, "name": "a", "price": 1.0, "quantity": 1},
            {"id": 1, "name": "b", "price": 1.0, "quantity": 1}
        ]"#,
    );

    let result = ProductFileStore::open(&path);

    assert!(matches!(result, Err(EstoreError::Corruption(_))));
}

#[test]
fn test_open_with_last_possible_id_fails() {
    let (_temp, path) = setup_products_file(
        r#"[{"id": 18446744073709551615, "name": "x", "price": 1.0, "quantity": 1}]"#,
    );

    let result = ProductFileStore::open(&path);

    assert!(matches!(result, Err(EstoreError::Corruption(_))));
}

#[test]
fn test_create_fails_when_ids_run_out() {
    let (_temp, path) = setup_products_file(
        r#"[{"id": 18446744073709551614, "name": "x", "price": 1.0, "quantity": 1}]"#,
    );
    let store = ProductFileStore::open(&path).unwrap();
    assert_eq!(store.next_id(), u64::MAX);

    let result = store.create(&Product::draft("Soda", 2.99, 20));

    assert!(matches!(result, Err(EstoreError::IdSpaceExhausted)));
    assert_eq!(store.len(), 1);
    assert_eq!(read_file(&path).len(), 1);
}

#[test]
fn test_open_negative_quantity() {
    let (_temp, path) =
        setup_products_file(r#"[{"id": 0, "name": "Backorder", "price": 5.0, "quantity": -3}]"#);

    let store = ProductFileStore::open(&path).unwrap();

    assert_eq!(store.get(0).unwrap().unwrap().quantity, -3);
}

#[test]
fn test_open_or_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("products.json");

    let store = ProductFileStore::open_or_init(&path).unwrap();

    assert!(path.exists());
    assert!(store.is_empty());
    assert!(read_file(&path).is_empty());
}

#[test]
fn test_open_or_init_keeps_existing_file() {
    let (_temp, path) =
        setup_products_file(r#"[{"id": 5, "name": "Soda", "price": 2.99, "quantity": 20}]"#);

    let store = ProductFileStore::open_or_init(&path).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.next_id(), 6);
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_on_empty_store_gets_id_zero() {
    let (_temp, store) = setup_empty_store();

    let created = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    assert_eq!(created, Product::new(0, "Soda", 2.99, 20));
}

#[test]
fn test_create_ignores_caller_id() {
    let (_temp, store) = setup_empty_store();

    let created = store.create(&Product::new(99, "Soda", 2.99, 20)).unwrap();

    assert_eq!(created.id, 0);
    assert!(store.get(99).unwrap().is_none());
}

#[test]
fn test_create_then_get_returns_same_record() {
    let (_temp, store) = setup_empty_store();

    let created = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    assert_eq!(store.get(created.id).unwrap(), Some(created));
}

#[test]
fn test_create_ids_are_monotonic() {
    let (_temp, store) = setup_empty_store();

    let mut last = None;
    for i in 0..10 {
        let created = store.create(&Product::draft(format!("p{}", i), 1.0, 1)).unwrap();
        if let Some(prev) = last {
            assert!(created.id > prev);
        }
        last = Some(created.id);
    }
}

#[test]
fn test_ids_not_reused_after_delete() {
    let (_temp, store) = setup_empty_store();

    let a = store.create(&Product::draft("a", 1.0, 1)).unwrap();
    let b = store.create(&Product::draft("b", 1.0, 1)).unwrap();
    assert!(store.delete(b.id).unwrap());
    assert!(store.delete(a.id).unwrap());

    let c = store.create(&Product::draft("c", 1.0, 1)).unwrap();

    assert!(c.id > b.id);
}

#[test]
fn test_create_persists_whole_set() {
    let (_temp, store) = setup_empty_store();

    store.create(&Product::draft("Soda", 2.99, 20)).unwrap();
    store.create(&Product::draft("Chips", 1.5, 4)).unwrap();

    let on_disk = read_file(store.path());
    assert_eq!(on_disk, store.get_all().unwrap());
}

// =============================================================================
// Find Tests
// =============================================================================

#[test]
fn test_find_substring() {
    let (_temp, store) = setup_empty_store();

    store.create(&Product::draft("Mineral Water", 3.40, 25)).unwrap();
    store.create(&Product::draft("Rose Water", 3.40, 25)).unwrap();
    store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    let water = store.find(Some("Water")).unwrap();
    assert_eq!(names(&water), vec!["Mineral Water", "Rose Water"]);

    let mineral = store.find(Some("Mineral")).unwrap();
    assert_eq!(names(&mineral), vec!["Mineral Water"]);
}

#[test]
fn test_find_is_case_sensitive() {
    let (_temp, store) = setup_empty_store();

    store.create(&Product::draft("Mineral Water", 3.40, 25)).unwrap();

    assert!(store.find(Some("water")).unwrap().is_empty());
}

#[test]
fn test_find_none_or_empty_equals_get_all() {
    let (_temp, store) = setup_empty_store();

    store.create(&Product::draft("Soda", 2.99, 20)).unwrap();
    store.create(&Product::draft("Chips", 1.5, 4)).unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(store.find(None).unwrap(), all);
    assert_eq!(store.find(Some("")).unwrap(), all);
}

#[test]
fn test_find_no_match_is_empty() {
    let (_temp, store) = setup_empty_store();

    store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    assert!(store.find(Some("Juice")).unwrap().is_empty());
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_replaces_record() {
    let (_temp, store) = setup_empty_store();

    let created = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();
    let changed = Product::new(created.id, "Diet Soda", 3.49, 12);

    let updated = store.update(&changed).unwrap();

    assert_eq!(updated, Some(changed.clone()));
    assert_eq!(store.get(created.id).unwrap(), Some(changed.clone()));
    assert_eq!(read_file(store.path()), vec![changed]);
}

#[test]
fn test_update_absent_returns_none_without_inserting() {
    let (_temp, store) = setup_empty_store();

    let result = store.update(&Product::new(42, "Ghost", 1.0, 1)).unwrap();

    assert!(result.is_none());
    assert!(store.get(42).unwrap().is_none());
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 0);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_get_is_not_found() {
    let (_temp, store) = setup_empty_store();

    let created = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    assert!(store.delete(created.id).unwrap());
    assert!(store.get(created.id).unwrap().is_none());
    assert!(read_file(store.path()).is_empty());
}

#[test]
fn test_delete_absent_returns_false_and_keeps_set() {
    let (_temp, store) = setup_empty_store();

    store.create(&Product::draft("Soda", 2.99, 20)).unwrap();
    let before = store.get_all().unwrap();

    assert!(!store.delete(7).unwrap());
    assert_eq!(store.get_all().unwrap(), before);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_reload_reproduces_records_and_next_id() {
    let (_temp, path) = setup_products_file("[]");

    let (records, next_id) = {
        let store = ProductFileStore::open(&path).unwrap();
        store.create(&Product::draft("Soda", 2.99, 20)).unwrap();
        let chips = store.create(&Product::draft("Chips", 1.5, 4)).unwrap();
        store.create(&Product::draft("Mineral Water", 3.40, 25)).unwrap();
        store.delete(chips.id).unwrap();
        (store.get_all().unwrap(), store.next_id())
    };

    let reopened = ProductFileStore::open(&path).unwrap();

    assert_eq!(reopened.get_all().unwrap(), records);
    assert_eq!(reopened.next_id(), next_id);
}

#[test]
fn test_reload_after_deleting_max_id_restarts_below() {
    // The counter is not persisted, so after a restart it is recomputed
    // from the ids still present in the file.
    let (_temp, path) = setup_products_file("[]");

    {
        let store = ProductFileStore::open(&path).unwrap();
        store.create(&Product::draft("a", 1.0, 1)).unwrap();
        let b = store.create(&Product::draft("b", 1.0, 1)).unwrap();
        store.delete(b.id).unwrap();
    }

    let reopened = ProductFileStore::open(&path).unwrap();

    assert_eq!(reopened.next_id(), 1);
}

#[test]
fn test_no_temp_file_left_behind() {
    let (temp, store) = setup_empty_store();

    store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("products.json")]);
}

// =============================================================================
// Write Failure Tests
// =============================================================================

/// Replace the products file with a directory so the rename step fails
fn break_products_file(path: &Path) {
    fs::remove_file(path).unwrap();
    fs::create_dir(path).unwrap();
}

fn repair_products_file(path: &Path) {
    fs::remove_dir(path).unwrap();
    fs::write(path, "[]").unwrap();
}

#[test]
fn test_failed_create_leaves_memory_unchanged() {
    let (_temp, store) = setup_empty_store();
    let soda = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    break_products_file(store.path());

    let result = store.create(&Product::draft("Chips", 1.5, 4));
    assert!(matches!(result, Err(EstoreError::Io(_))));
    assert_eq!(store.get_all().unwrap(), vec![soda.clone()]);
    assert_eq!(store.next_id(), 1);

    repair_products_file(store.path());

    let chips = store.create(&Product::draft("Chips", 1.5, 4)).unwrap();
    assert_eq!(chips.id, 1);
    assert_eq!(read_file(store.path()), vec![soda, chips]);
}

#[test]
fn test_failed_update_restores_previous_record() {
    let (_temp, store) = setup_empty_store();
    let soda = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    break_products_file(store.path());

    let result = store.update(&Product::new(soda.id, "Diet Soda", 3.49, 12));
    assert!(matches!(result, Err(EstoreError::Io(_))));
    assert_eq!(store.get(soda.id).unwrap(), Some(soda));
}

#[test]
fn test_failed_delete_restores_record() {
    let (_temp, store) = setup_empty_store();
    let soda = store.create(&Product::draft("Soda", 2.99, 20)).unwrap();

    break_products_file(store.path());

    let result = store.delete(soda.id);
    assert!(matches!(result, Err(EstoreError::Io(_))));
    assert_eq!(store.get(soda.id).unwrap(), Some(soda));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_creates_get_unique_ids() {
    let (_temp, store) = setup_empty_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        store
                            .create(&Product::draft(format!("t{}-{}", t, i), 1.0, 1))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 100);
    assert_eq!(store.next_id(), 100);
    assert_eq!(read_file(store.path()).len(), 100);
}
