use std::sync::Arc;

use proptest::prelude::*;
use roster::record::Record;
use roster::selection;
use roster::store::persistence::{
    decode_records, encode_records, KeyValueStorage, MemoryStorage, RecordPersistence,
    SledStorage, DEFAULT_TABLE_KEY,
};
use roster::store::RecordStore;
use tempfile::TempDir;

use crate::integration::support::{arb_records, new_record};

fn sled_persistence(dir: &TempDir) -> RecordPersistence {
    let storage = SledStorage::open(&dir.path().join("store")).unwrap();
    RecordPersistence::new(Arc::new(storage), DEFAULT_TABLE_KEY)
}

#[test]
fn sled_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let ids = {
        let mut store = RecordStore::open(sled_persistence(&dir));
        let a = store.add(new_record("Alice", "DC United", "Active"));
        let b = store.add(new_record("Bob", "LA Galaxy", "Closed"));
        store.set_selection(&b, true);
        vec![a, b]
    };

    let store = RecordStore::open(sled_persistence(&dir));
    let loaded: Vec<_> = store.records().iter().map(|r| r.id).collect();
    assert_eq!(loaded, ids);
    assert!(!store.records()[0].selected);
    assert!(store.records()[1].selected);
}

#[test]
fn payload_is_a_plain_json_array_under_the_table_key() {
    let storage = Arc::new(MemoryStorage::new());
    let persistence = RecordPersistence::new(storage.clone(), DEFAULT_TABLE_KEY);
    let mut store = RecordStore::open(persistence);
    store.add(new_record("Alice", "DC United", "Active"));

    let raw = storage.get("tableData").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    for field in ["id", "name", "company", "status", "notes", "lastUpdated", "selected"] {
        assert!(rows[0].get(field).is_some(), "missing field {}", field);
    }
}

#[test]
fn legacy_payload_loads_with_fresh_ids() {
    let raw = r#"[
        {"name":"Alice","company":"DC United","status":"Active","notes":"","lastUpdated":"2023-05-01"},
        {"name":"Bob","company":"LA Galaxy","status":"Closed","notes":"x","lastUpdated":"2023-05-02","selected":true}
    ]"#;
    let storage = Arc::new(MemoryStorage::with_value(DEFAULT_TABLE_KEY, raw));
    let mut store = RecordStore::open(RecordPersistence::new(storage, DEFAULT_TABLE_KEY));
    assert_eq!(store.len(), 2);
    let alice = store.records()[0].id;
    assert_ne!(alice, store.records()[1].id);
    assert!(store.records()[1].selected);

    assert!(store.remove(&alice));
    assert_eq!(store.records()[0].name, "Bob");
}

#[test]
fn legacy_ids_are_stable_across_sled_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let storage = SledStorage::open(&dir.path().join("store")).unwrap();
        storage
            .set(
                DEFAULT_TABLE_KEY,
                r#"[{"name":"Alice","company":"DC United","status":"Active","notes":"","lastUpdated":"2023-05-01"}]"#,
            )
            .unwrap();
    }

    let first: Vec<_> = {
        let store = RecordStore::open(sled_persistence(&dir));
        store.records().iter().map(|r| r.id).collect()
    };
    let mut store = RecordStore::open(sled_persistence(&dir));
    let second: Vec<_> = store.records().iter().map(|r| r.id).collect();
    assert_eq!(first, second);

    let short = first[0].short();
    let resolved = store.resolve(&short).unwrap();
    assert!(store.remove(&resolved));
    drop(store);
    assert!(RecordStore::open(sled_persistence(&dir)).is_empty());
}

#[test]
fn duplicate_ids_are_stable_across_sled_reopen() {
    let dir = TempDir::new().unwrap();
    let alice = Record::from_new(new_record("Alice", "DC United", "Active"));
    let mut bob = Record::from_new(new_record("Bob", "LA Galaxy", "Closed"));
    bob.id = alice.id;
    {
        let storage = SledStorage::open(&dir.path().join("store")).unwrap();
        storage
            .set(DEFAULT_TABLE_KEY, &encode_records(&[alice.clone(), bob]).unwrap())
            .unwrap();
    }

    let first = RecordStore::open(sled_persistence(&dir)).records().to_vec();
    let second = RecordStore::open(sled_persistence(&dir)).records().to_vec();
    assert_eq!(first, second);
    assert_eq!(second[0].id, alice.id);
    assert_ne!(second[1].id, alice.id);
}

#[test]
fn corrupt_sled_value_starts_empty_and_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(SledStorage::open(&dir.path().join("store")).unwrap());
    storage.set(DEFAULT_TABLE_KEY, "[{\"broken\"").unwrap();

    let mut store = RecordStore::open(RecordPersistence::new(storage.clone(), DEFAULT_TABLE_KEY));
    assert!(store.is_empty());
    store.add(new_record("Alice", "DC United", "Active"));
    let raw = storage.get(DEFAULT_TABLE_KEY).unwrap().unwrap();
    assert_eq!(decode_records(&raw).unwrap().len(), 1);
}

#[test]
fn quota_failure_does_not_interrupt_operations() {
    let storage = Arc::new(MemoryStorage::with_quota(200));
    let mut store = RecordStore::open(RecordPersistence::new(storage, DEFAULT_TABLE_KEY));
    for i in 0..5 {
        store.add(new_record(&format!("member {}", i), "DC United", "Active"));
    }
    assert_eq!(store.len(), 5);
    assert!(store.last_flush_failed());

    selection::toggle_all(&mut store, false);
    assert!(selection::select_all(store.records()));
}

proptest! {
    #[test]
    fn encode_decode_roundtrip(records in arb_records()) {
        let raw = encode_records(&records).unwrap();
        prop_assert_eq!(decode_records(&raw).unwrap(), records);
    }

    #[test]
    fn add_then_remove_restores_content(records in arb_records()) {
        let storage = Arc::new(MemoryStorage::with_value(
            DEFAULT_TABLE_KEY,
            &encode_records(&records).unwrap(),
        ));
        let mut store = RecordStore::open(RecordPersistence::new(storage, DEFAULT_TABLE_KEY));
        let before = store.records().to_vec();

        let id = store.add(new_record("Cee", "X", "Active"));
        prop_assert!(store.remove(&id));

        prop_assert_eq!(store.len(), before.len());
        for (a, b) in store.records().iter().zip(&before) {
            prop_assert!(a.same_content(b));
        }
    }

    #[test]
    fn toggle_all_sets_every_flag(records in arb_records(), current in any::<bool>()) {
        let storage = Arc::new(MemoryStorage::with_value(
            DEFAULT_TABLE_KEY,
            &encode_records(&records).unwrap(),
        ));
        let mut store = RecordStore::open(RecordPersistence::new(storage, DEFAULT_TABLE_KEY));
        selection::toggle_all(&mut store, current);
        prop_assert!(store.records().iter().all(|r| r.selected == !current));
        prop_assert_eq!(
            selection::select_all(store.records()),
            !current && !store.is_empty()
        );
    }
}
