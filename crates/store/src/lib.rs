//! The admitdb collection store.
//!
//! [`CollectionStore`] provides serialized CRUD and query access to named
//! in-memory collections, with bounded-wait mutual exclusion per collection.
//! Collections are independent: operations on different collections never
//! block each other; operations on the same collection execute one at a
//! time.
//!
//! # Example
//!
//! ```
//! use admit_store::CollectionStore;
//! use serde_json::json;
//!
//! let store = CollectionStore::new();
//! let mut fields = serde_json::Map::new();
//! fields.insert("name".to_string(), json!("Ana"));
//!
//! let record = store.create("contacts", fields).unwrap();
//! let fetched = store.get("contacts", record.id).unwrap();
//! assert_eq!(fetched, record);
//! ```

mod collection;
mod stats;
mod store;

pub use stats::{CollectionStats, StoreStats};
pub use store::CollectionStore;
