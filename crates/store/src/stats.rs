//! Diagnostics snapshot types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-collection diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    /// Number of records in the collection
    pub size: usize,
    /// Whether some operation held the collection's lock at snapshot time
    pub locked: bool,
}

/// A point-in-time view of the whole store, for a diagnostics endpoint.
///
/// Assembled without acquiring any collection lock, so a slow operation
/// cannot stall diagnostics. Values are therefore approximate under
/// concurrent mutation. BTreeMap keeps the serialized output in a stable
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    /// Stats per collection name
    pub collections: BTreeMap<String, CollectionStats>,
    /// Total records across all collections
    pub total: usize,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}
