//! Typed load/save primitive over a storage medium.
//!
//! The store owns JSON encoding and the read-fallback policy: a missing,
//! corrupt, or type-mismatched record yields the caller's default instead of
//! an error. Writes are best-effort: a medium failure is logged and
//! swallowed, so callers treat persistence as durable-on-success and
//! fire-and-forget on failure. Silent data loss under medium failure is a
//! documented non-goal, not a bug.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::domain::ports::{StorageKey, StorageMedium};

/// Typed store over a shared medium.
pub struct Store<M> {
    medium: Arc<M>,
}

impl<M> Clone for Store<M> {
    fn clone(&self) -> Self {
        Self {
            medium: Arc::clone(&self.medium),
        }
    }
}

impl<M: StorageMedium> Store<M> {
    /// Create a store over `medium`.
    pub fn new(medium: Arc<M>) -> Self {
        Self { medium }
    }

    /// Load the record at `key`, substituting `default` when the record is
    /// missing or unreadable. Corruption is logged, never surfaced.
    pub fn load<T: DeserializeOwned>(&self, key: &StorageKey, default: T) -> T {
        let raw = match self.medium.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!(key = %key, error = %err, "storage read failed, using default");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "corrupt record, using default");
                default
            }
        }
    }

    /// Save `value` at `key`. Failures are logged and swallowed; the caller
    /// still reports success.
    pub fn save<T: Serialize>(&self, key: &StorageKey, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(key = %key, error = %err, "failed to encode record, write skipped");
                return;
            }
        };
        if let Err(err) = self.medium.write(key, encoded) {
            error!(key = %key, error = %err, "failed to persist record, write lost");
        }
    }

    /// Remove the record at `key`, logging failures.
    pub fn remove(&self, key: &StorageKey) {
        if let Err(err) = self.medium.remove(key) {
            error!(key = %key, error = %err, "failed to remove record");
        }
    }
}
