//! Store configuration.

use std::time::Duration;

/// Default bound on waiting for a collection lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(5000);

/// Tuning knobs for a `CollectionStore`.
///
/// Currently a single knob: how long an operation may wait for its
/// collection's lock before failing with
/// [`StoreError::LockTimeout`](crate::StoreError::LockTimeout).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum wait per lock acquisition attempt.
    pub lock_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Config with a custom lock timeout.
    ///
    /// Tests use short timeouts here so contention failures surface quickly.
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self { lock_timeout }
    }
}
