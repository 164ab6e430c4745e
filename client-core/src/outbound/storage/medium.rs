//! In-memory storage medium, the process-wide localStorage stand-in.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::ports::{StorageKey, StorageMedium, StorageMediumError};

/// Process-wide key-value medium backed by a mutex-guarded map.
///
/// The mutex keeps individual reads and writes coherent across threads, but
/// it does not serialise a repository's whole read-modify-write sequence;
/// the core's contract assumes no two operations touch the same
/// `(resource, user)` key concurrently. Porting to a genuinely concurrent
/// caller would need per-key mutual exclusion on top.
#[derive(Debug, Default)]
pub struct InMemoryMedium {
    records: Mutex<HashMap<StorageKey, String>>,
}

impl InMemoryMedium {
    /// Create an empty medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<StorageKey, String>>, StorageMediumError> {
        self.records
            .lock()
            .map_err(|_| StorageMediumError::backend("storage mutex poisoned"))
    }
}

impl StorageMedium for InMemoryMedium {
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StorageMediumError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &StorageKey, value: String) -> Result<(), StorageMediumError> {
        self.lock()?.insert(*key, value);
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<(), StorageMediumError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
