//! Serialized CRUD and query access to named in-memory collections.

use crate::collection::{Collection, TableGuard};
use crate::stats::{CollectionStats, StoreStats};
use admit_core::{Fields, Record, RecordId, Result, StoreConfig, StoreError};
use chrono::Utc;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// An in-memory keyed record store with per-collection mutual exclusion.
///
/// Collections are created lazily on first use; the store is
/// collection-name-agnostic. Every operation runs inside an
/// acquire/release bracket on the named collection's lock:
///
/// - acquisition waits at most [`StoreConfig::lock_timeout`], then fails
///   with [`StoreError::LockTimeout`] without having executed;
/// - at most one operation executes against a collection at any instant;
/// - the lock is released on every exit path, including failures inside
///   the operation body;
/// - operations on *different* collections never block each other.
///
/// There is no fairness guarantee among simultaneous waiters on one
/// collection, and no snapshot isolation across multiple calls: each call
/// observes the state at the instant its lock was acquired.
///
/// # Ownership
///
/// The store is an explicitly constructed value. Collaborators share it as
/// `Arc<CollectionStore>`; it holds no global state and drops with the
/// last reference.
#[derive(Debug, Default)]
pub struct CollectionStore {
    collections: DashMap<String, Arc<Collection>>,
    config: StoreConfig,
}

impl CollectionStore {
    /// Create an empty store with the default lock timeout.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with custom lock tuning.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            collections: DashMap::new(),
            config,
        }
    }

    /// The store's configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get or lazily create the named collection.
    pub(crate) fn collection(&self, name: &str) -> Arc<Collection> {
        if let Some(existing) = self.collections.get(name) {
            return Arc::clone(existing.value());
        }
        Arc::clone(self.collections.entry(name.to_string()).or_default().value())
    }

    /// Acquire the collection's record table within the configured bound.
    fn acquire<'a>(&self, name: &str, collection: &'a Collection) -> Result<TableGuard<'a>> {
        collection.lock_for(self.config.lock_timeout).ok_or_else(|| {
            warn!(
                collection = name,
                timeout_ms = self.config.lock_timeout.as_millis() as u64,
                "lock acquisition timed out"
            );
            StoreError::LockTimeout {
                collection: name.to_string(),
                waited: self.config.lock_timeout,
            }
        })
    }

    fn not_found(name: &str, id: RecordId) -> StoreError {
        StoreError::NotFound {
            collection: name.to_string(),
            id,
        }
    }

    /// Insert a new record built from `fields`.
    ///
    /// Assigns a fresh id and equal created/updated timestamps; returns the
    /// stored record. Field validation is the caller's responsibility and
    /// happens before this call.
    pub fn create(&self, collection: &str, fields: Fields) -> Result<Record> {
        let coll = self.collection(collection);
        let mut table = self.acquire(collection, &coll)?;

        let record = Record::new(fields);
        table.insert(record.id, record.clone());
        coll.note_size(&table);

        debug!(collection, id = %record.id, "record created");
        Ok(record)
    }

    /// All records in the collection, in store iteration order.
    ///
    /// Callers needing recency order sort by `created_at` themselves.
    pub fn get_all(&self, collection: &str) -> Result<Vec<Record>> {
        let coll = self.collection(collection);
        let table = self.acquire(collection, &coll)?;

        let records: Vec<Record> = table.values().cloned().collect();
        debug!(collection, count = records.len(), "fetched all records");
        Ok(records)
    }

    /// The record with the given id.
    pub fn get(&self, collection: &str, id: RecordId) -> Result<Record> {
        let coll = self.collection(collection);
        let table = self.acquire(collection, &coll)?;

        table
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(collection, id))
    }

    /// Merge `partial` over the existing record.
    ///
    /// `id` and `created_at` keep their stored values regardless of what
    /// `partial` contains; `updated_at` strictly advances. Returns the
    /// merged record.
    pub fn update(&self, collection: &str, id: RecordId, partial: Fields) -> Result<Record> {
        let coll = self.collection(collection);
        let mut table = self.acquire(collection, &coll)?;

        let record = table
            .get_mut(&id)
            .ok_or_else(|| Self::not_found(collection, id))?;
        record.apply(partial);
        let updated = record.clone();

        debug!(collection, id = %id, "record updated");
        Ok(updated)
    }

    /// Remove the record with the given id; returns the id as confirmation.
    pub fn delete(&self, collection: &str, id: RecordId) -> Result<RecordId> {
        let coll = self.collection(collection);
        let mut table = self.acquire(collection, &coll)?;

        table
            .remove(&id)
            .ok_or_else(|| Self::not_found(collection, id))?;
        coll.note_size(&table);

        debug!(collection, id = %id, "record deleted");
        Ok(id)
    }

    /// Records whose every `criteria` key strictly equals the
    /// corresponding field value.
    ///
    /// Exact `serde_json::Value` equality only; criteria address caller
    /// fields, not system fields. Zero matches yields an empty vec. Use
    /// [`get_all`](Self::get_all) rather than empty criteria to fetch
    /// everything.
    pub fn find(&self, collection: &str, criteria: &Fields) -> Result<Vec<Record>> {
        let coll = self.collection(collection);
        let table = self.acquire(collection, &coll)?;

        let matches: Vec<Record> = table
            .values()
            .filter(|record| record.matches(criteria))
            .cloned()
            .collect();

        debug!(collection, count = matches.len(), "find completed");
        Ok(matches)
    }

    /// Number of records in the collection.
    pub fn count(&self, collection: &str) -> Result<usize> {
        let coll = self.collection(collection);
        let table = self.acquire(collection, &coll)?;
        Ok(table.len())
    }

    /// Remove every record in the collection; returns how many there were.
    pub fn clear(&self, collection: &str) -> Result<usize> {
        let coll = self.collection(collection);
        let mut table = self.acquire(collection, &coll)?;

        let removed = table.len();
        table.clear();
        coll.note_size(&table);

        debug!(collection, removed, "collection cleared");
        Ok(removed)
    }

    /// Point-in-time diagnostics snapshot.
    ///
    /// Reads per-collection size counters and lock flags without acquiring
    /// any collection lock, so it never blocks behind a slow operation.
    pub fn stats(&self) -> StoreStats {
        let mut collections = BTreeMap::new();
        let mut total = 0;
        for entry in self.collections.iter() {
            let size = entry.value().size();
            total += size;
            collections.insert(
                entry.key().clone(),
                CollectionStats {
                    size,
                    locked: entry.value().is_locked(),
                },
            );
        }
        StoreStats {
            collections,
            total,
            timestamp: Utc::now(),
        }
    }
}
