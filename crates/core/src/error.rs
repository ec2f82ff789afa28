//! Error types for store operations.
//!
//! Exactly two failure kinds originate from the datastore:
//! - [`StoreError::NotFound`]: an operation referenced an id that is not in
//!   the collection (a 404-equivalent for callers)
//! - [`StoreError::LockTimeout`]: the collection lock could not be acquired
//!   within the configured bound (a busy-system signal; callers may retry)
//!
//! Neither is fatal. Errors raised inside a critical section propagate to
//! the caller with the lock already released.

use crate::record::RecordId;
use std::time::Duration;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced by the collection store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given id exists in the collection.
    #[error("record {id} not found in collection '{collection}'")]
    NotFound {
        /// Collection that was searched
        collection: String,
        /// The id that was requested
        id: RecordId,
    },

    /// The collection lock could not be acquired within the wait bound.
    ///
    /// The operation never executed; no state was changed.
    #[error("timed out after {waited:?} waiting for lock on collection '{collection}'")]
    LockTimeout {
        /// Collection whose lock was contended
        collection: String,
        /// How long the caller waited before giving up
        waited: Duration,
    },
}

impl StoreError {
    /// The collection the failed operation was addressed to.
    pub fn collection(&self) -> &str {
        match self {
            StoreError::NotFound { collection, .. } => collection,
            StoreError::LockTimeout { collection, .. } => collection,
        }
    }

    /// True for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for [`StoreError::LockTimeout`].
    pub fn is_lock_timeout(&self) -> bool {
        matches!(self, StoreError::LockTimeout { .. })
    }
}
