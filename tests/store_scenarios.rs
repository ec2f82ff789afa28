//! End-to-end scenarios for the collection store, exercised through the
//! public facade.

use admitdb::{CollectionStore, Fields, RecordId, StoreError};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn fields(pairs: &[(&str, serde_json::Value)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn create_update_delete_lifecycle() {
    let store = CollectionStore::new();

    // Create record A = {name: "Ana"} in collection "contacts"
    let a = store
        .create("contacts", fields(&[("name", json!("Ana"))]))
        .unwrap();
    assert_eq!(a.created_at, a.updated_at);
    assert_eq!(a.field_str("name"), Some("Ana"));

    // Immediately readable and equal
    assert_eq!(store.get("contacts", a.id).unwrap(), a);

    // Update merges, preserves identity, advances updated_at
    let updated = store
        .update("contacts", a.id, fields(&[("name", json!("Ana Maria"))]))
        .unwrap();
    assert_eq!(updated.field_str("name"), Some("Ana Maria"));
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.created_at, a.created_at);
    assert!(updated.updated_at > a.updated_at);

    // Delete removes permanently
    store.delete("contacts", a.id).unwrap();
    assert!(matches!(
        store.get("contacts", a.id),
        Err(StoreError::NotFound { .. })
    ));
    assert_eq!(store.count("contacts").unwrap(), 0);
}

#[test]
fn absent_ids_fail_not_found() {
    let store = CollectionStore::new();
    let id = RecordId::new();

    assert!(matches!(
        store.get("users", id),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.update("users", id, Fields::new()),
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete("users", id),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn find_matches_strict_equality_subset() {
    let store = CollectionStore::new();
    store
        .create("users", fields(&[("role", json!("student")), ("n", json!(1))]))
        .unwrap();
    store
        .create("users", fields(&[("role", json!("student")), ("n", json!(2))]))
        .unwrap();
    store
        .create("users", fields(&[("role", json!("staff"))]))
        .unwrap();

    let students = store
        .find("users", &fields(&[("role", json!("student"))]))
        .unwrap();
    assert_eq!(students.len(), 2);

    let all = store.get_all("users").unwrap();
    for record in &students {
        assert!(all.contains(record));
        assert_eq!(record.field("role"), Some(&json!("student")));
    }

    // Zero matches: empty vec, not an error
    let none = store
        .find("users", &fields(&[("role", json!("nobody"))]))
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn collections_are_independent() {
    let store = Arc::new(CollectionStore::new());

    // Hammer three collections from separate threads; none of them can
    // block another, and each ends with exactly its own records.
    let handles: Vec<_> = ["users", "contacts", "enrollments"]
        .into_iter()
        .map(|collection| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..100 {
                    store
                        .create(collection, fields(&[("i", json!(i))]))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for collection in ["users", "contacts", "enrollments"] {
        assert_eq!(store.count(collection).unwrap(), 100);
    }

    let stats = store.stats();
    assert_eq!(stats.total, 300);
    assert_eq!(stats.collections.len(), 3);
    assert!(stats.collections.values().all(|c| c.size == 100 && !c.locked));
}

#[test]
fn clear_empties_a_collection() {
    let store = CollectionStore::new();
    for _ in 0..5 {
        store.create("contacts", Fields::new()).unwrap();
    }
    store.create("users", Fields::new()).unwrap();

    assert_eq!(store.clear("contacts").unwrap(), 5);
    assert_eq!(store.count("contacts").unwrap(), 0);
    // Other collections untouched
    assert_eq!(store.count("users").unwrap(), 1);
}

#[test]
fn records_serialize_flat_with_camel_case_system_fields() {
    let store = CollectionStore::new();
    let record = store
        .create("contacts", fields(&[("name", json!("Ana"))]))
        .unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["name"], json!("Ana"));
    assert_eq!(value["id"], json!(record.id.to_string()));
    assert!(value["createdAt"].is_string());
    assert!(value["updatedAt"].is_string());
}
