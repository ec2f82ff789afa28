//! Per-collection state: the record table and its lock.

use admit_core::{Record, RecordId};
use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// One named collection: a keyed record table behind a timed mutex.
///
/// The mutex is the sole mutation guard; there is no reader/writer
/// distinction (readers and writers exclude each other identically). The
/// size counter is maintained inside critical sections so diagnostics can
/// read it without taking the lock.
#[derive(Debug, Default)]
pub(crate) struct Collection {
    records: Mutex<FxHashMap<RecordId, Record>>,
    size: AtomicUsize,
}

pub(crate) type TableGuard<'a> = MutexGuard<'a, FxHashMap<RecordId, Record>>;

impl Collection {
    /// Acquire the record table, waiting at most `timeout`.
    ///
    /// Returns `None` if the lock was still held when the wait bound
    /// expired. Waiters are not served in FIFO order; whichever waiter the
    /// lock hands off to proceeds first.
    pub(crate) fn lock_for(&self, timeout: Duration) -> Option<TableGuard<'_>> {
        self.records.try_lock_for(timeout)
    }

    /// Refresh the size counter from a held guard.
    ///
    /// Call before releasing the guard after any mutation.
    pub(crate) fn note_size(&self, table: &TableGuard<'_>) {
        self.size.store(table.len(), Ordering::Release);
    }

    /// Current record count, without taking the lock.
    pub(crate) fn size(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    /// Whether some operation currently holds this collection's lock.
    pub(crate) fn is_locked(&self) -> bool {
        self.records.is_locked()
    }

    /// Test access to the raw mutex, for simulating a slow operation that
    /// holds a collection's lock.
    #[cfg(test)]
    pub(crate) fn raw(&self) -> &Mutex<FxHashMap<RecordId, Record>> {
        &self.records
    }
}
