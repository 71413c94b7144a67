//! Tests for RecordStore
//!
//! These tests verify:
//! - Missing file behaves as an empty store
//! - Append order is preserved across reloads
//! - Duplicate ids accumulate
//! - Delete removes every match and keeps the rest in order
//! - Damaged files load partially and are reported as such
//! - Structured mutations refuse to rewrite a damaged file
//! - Failed rewrites are reported without panicking

use std::fs::{self, OpenOptions};
use std::io::Write;

use rosterkv::config::{Config, SyncStrategy};
use rosterkv::record::HEADER_SIZE;
use rosterkv::store::{LoadStatus, RecordStore};
use rosterkv::{Record, RosterError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(temp_dir.path().join("students.dat"))
        .sync_strategy(SyncStrategy::EveryRewrite)
        .build();
    let store = RecordStore::open(config).unwrap();
    (temp_dir, store)
}

fn alice() -> Record {
    Record::new(1, "Alice", 3.5)
}

fn bob() -> Record {
    Record::new(2, "Bob", 3.9)
}

fn append_garbage(store: &RecordStore, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
    file.write_all(bytes).unwrap();
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_does_not_create_file() {
    let (_temp, store) = setup_temp_store();

    assert!(!store.path().exists());
}

#[test]
fn test_open_path_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roster.dat");

    let store = RecordStore::open_path(&path).unwrap();

    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.config().sync_strategy, SyncStrategy::EveryRewrite);
}

#[test]
fn test_open_rejects_directory() {
    let temp_dir = TempDir::new().unwrap();

    let result = RecordStore::open_path(temp_dir.path());

    assert!(matches!(result, Err(RosterError::Config(_))));
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_empty() {
    let (_temp, store) = setup_temp_store();

    assert!(store.load_all().is_empty());

    let outcome = store.try_load_all().unwrap();
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.status, LoadStatus::Absent);
}

#[test]
fn test_load_empty_file_is_complete() {
    let (_temp, store) = setup_temp_store();
    fs::File::create(store.path()).unwrap();

    let outcome = store.try_load_all().unwrap();

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.status, LoadStatus::Complete);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_then_load_scenario() {
    let (_temp, store) = setup_temp_store();

    assert!(store.append(alice()));
    assert!(store.append(bob()));

    assert_eq!(store.load_all(), vec![alice(), bob()]);

    assert!(store.delete_by_id(1));

    assert_eq!(store.load_all(), vec![bob()]);
}

#[test]
fn test_append_preserves_order() {
    let (_temp, store) = setup_temp_store();
    let records: Vec<Record> = (0..50)
        .map(|i| Record::new(50 - i, format!("student{}", i), (i as f32) / 20.0))
        .collect();

    for record in &records {
        assert!(store.append(record.clone()));
    }

    assert_eq!(store.load_all(), records);
}

#[test]
fn test_append_survives_reopen() {
    let (temp, store) = setup_temp_store();
    store.append(alice());
    store.append(bob());
    drop(store);

    let reopened = RecordStore::open_path(&temp.path().join("students.dat")).unwrap();

    assert_eq!(reopened.load_all(), vec![alice(), bob()]);
}

#[test]
fn test_append_duplicate_id_keeps_both() {
    let (_temp, store) = setup_temp_store();
    let twin = Record::new(1, "Alicia", 2.0);

    store.append(alice());
    store.append(twin.clone());

    assert_eq!(store.load_all(), vec![alice(), twin.clone()]);
    assert_eq!(store.find_by_id(1), vec![alice(), twin]);
}

#[test]
fn test_try_append_reports_count() {
    let (_temp, store) = setup_temp_store();

    assert_eq!(store.try_append(alice()).unwrap(), 1);
    assert_eq!(store.try_append(bob()).unwrap(), 2);
    assert_eq!(store.try_append(alice()).unwrap(), 3);
}

#[test]
fn test_append_without_sync() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(temp_dir.path().join("students.dat"))
        .sync_strategy(SyncStrategy::Never)
        .build();
    let store = RecordStore::open(config).unwrap();

    assert!(store.append(alice()));

    assert_eq!(store.load_all(), vec![alice()]);
}

#[test]
fn test_append_to_unwritable_location_returns_false() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing_dir").join("students.dat");
    let store = RecordStore::open_path(&path).unwrap();

    assert!(!store.append(alice()));
    assert!(matches!(store.try_append(alice()), Err(RosterError::Io(_))));
    assert!(store.load_all().is_empty());
}

#[test]
fn test_oversized_append_leaves_file_untouched() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());
    let before = fs::read(store.path()).unwrap();

    let huge = Record::new(9, "x".repeat(2 * 1024 * 1024), 1.0);

    assert!(!store.append(huge));
    assert_eq!(fs::read(store.path()).unwrap(), before);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_all_matches_in_order() {
    let (_temp, store) = setup_temp_store();
    let records = vec![
        Record::new(1, "a", 1.0),
        Record::new(2, "b", 2.0),
        Record::new(1, "c", 3.0),
        Record::new(3, "d", 4.0),
        Record::new(1, "e", 0.5),
    ];
    for record in &records {
        store.append(record.clone());
    }

    assert_eq!(store.try_delete_by_id(1).unwrap(), 3);

    assert_eq!(
        store.load_all(),
        vec![Record::new(2, "b", 2.0), Record::new(3, "d", 4.0)]
    );
}

#[test]
fn test_delete_missing_id_leaves_content_equal() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());
    store.append(bob());
    let before = fs::read(store.path()).unwrap();

    assert!(store.delete_by_id(99));
    assert_eq!(store.try_delete_by_id(99).unwrap(), 0);

    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(store.load_all(), vec![alice(), bob()]);
}

#[test]
fn test_delete_on_missing_file_creates_empty_file() {
    let (_temp, store) = setup_temp_store();

    assert!(store.delete_by_id(1));

    assert!(store.path().exists());
    assert_eq!(store.try_load_all().unwrap().status, LoadStatus::Complete);
}

#[test]
fn test_delete_last_record_empties_store() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());

    store.delete_by_id(1);

    assert!(store.load_all().is_empty());
    assert_eq!(fs::metadata(store.path()).unwrap().len(), 0);
}

// =============================================================================
// Find Tests
// =============================================================================

#[test]
fn test_find_by_id() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());
    store.append(bob());

    assert_eq!(store.find_by_id(2), vec![bob()]);
    assert!(store.find_by_id(3).is_empty());
}

// =============================================================================
// Damaged File Tests
// =============================================================================

#[test]
fn test_truncated_tail_loads_prefix() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());
    store.append(bob());

    let len = fs::metadata(store.path()).unwrap().len();
    let file = OpenOptions::new().write(true).open(store.path()).unwrap();
    file.set_len(len - 2).unwrap();
    drop(file);

    assert_eq!(store.load_all(), vec![alice()]);

    let outcome = store.try_load_all().unwrap();
    assert!(outcome.is_partial());
    assert_eq!(outcome.records, vec![alice()]);
}

#[test]
fn test_corrupt_middle_frame_stops_load() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());
    let first_len = fs::metadata(store.path()).unwrap().len() as usize;
    store.append(bob());
    store.append(Record::new(3, "Carol", 2.75));

    // Flip a payload byte inside Bob's frame
    let mut bytes = fs::read(store.path()).unwrap();
    bytes[first_len + HEADER_SIZE] ^= 0xFF;
    fs::write(store.path(), &bytes).unwrap();

    let outcome = store.try_load_all().unwrap();

    assert_eq!(outcome.records, vec![alice()]);
    match outcome.status {
        LoadStatus::Partial { reason } => assert!(reason.contains("CRC")),
        other => panic!("expected partial load, got {:?}", other),
    }
}

/// Alice, Bob, Carol with a flipped byte in Bob's payload
fn setup_store_with_damaged_middle() -> (TempDir, RecordStore, Vec<u8>) {
    let (temp, store) = setup_temp_store();
    store.append(alice());
    let first_len = fs::metadata(store.path()).unwrap().len() as usize;
    store.append(bob());
    store.append(Record::new(3, "Carol", 2.75));

    let mut bytes = fs::read(store.path()).unwrap();
    bytes[first_len + HEADER_SIZE] ^= 0xFF;
    fs::write(store.path(), &bytes).unwrap();

    (temp, store, bytes)
}

#[test]
fn test_try_append_refuses_damaged_file() {
    let (_temp, store, damaged) = setup_store_with_damaged_middle();

    let result = store.try_append(Record::new(4, "Dave", 3.0));

    assert!(matches!(result, Err(RosterError::Corruption(_))));
    assert_eq!(fs::read(store.path()).unwrap(), damaged);
}

#[test]
fn test_try_delete_refuses_damaged_file() {
    let (_temp, store, damaged) = setup_store_with_damaged_middle();

    let result = store.try_delete_by_id(42);

    assert!(matches!(result, Err(RosterError::Corruption(_))));
    assert_eq!(fs::read(store.path()).unwrap(), damaged);
}

#[test]
fn test_delete_on_damaged_file_keeps_readable_prefix() {
    let (_temp, store, _) = setup_store_with_damaged_middle();

    assert!(store.delete_by_id(42));

    let outcome = store.try_load_all().unwrap();
    assert_eq!(outcome.status, LoadStatus::Complete);
    assert_eq!(outcome.records, vec![alice()]);
}

#[test]
fn test_append_after_damage_rewrites_surviving_prefix() {
    let (_temp, store) = setup_temp_store();
    store.append(alice());
    append_garbage(&store, &[0xDE, 0xAD]);

    assert!(store.append(bob()));

    let outcome = store.try_load_all().unwrap();
    assert_eq!(outcome.status, LoadStatus::Complete);
    assert_eq!(outcome.records, vec![alice(), bob()]);
}

#[test]
fn test_garbage_only_file_loads_empty() {
    let (_temp, store) = setup_temp_store();
    fs::write(store.path(), b"not a roster file at all").unwrap();

    assert!(store.load_all().is_empty());
    assert!(store.try_load_all().unwrap().is_partial());
}
