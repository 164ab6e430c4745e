//! Port for the raw key-value medium underneath the typed store.
//!
//! The medium stores encoded JSON strings keyed by [`StorageKey`]. It is the
//! process-wide stand-in for browser `localStorage`: adapters must tolerate
//! concurrent handles, but the core's logical transactions assume no two
//! operations touch the same `(resource, user)` key concurrently; per-key
//! mutual exclusion is out of scope for this crate.

use super::{StorageKey, define_port_error};

define_port_error! {
    /// Errors raised by storage medium adapters.
    pub enum StorageMediumError {
        /// The medium rejected the operation (full, unavailable, corrupt).
        Backend { message: String } =>
            "storage medium failure: {message}",
    }
}

/// Port for raw record storage and retrieval.
///
/// Values are opaque encoded strings; serialisation is owned by the typed
/// store layered on top.
#[cfg_attr(test, mockall::automock)]
pub trait StorageMedium: Send + Sync {
    /// Read the record stored at `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageMediumError::Backend`] when the medium cannot be
    /// read.
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StorageMediumError>;

    /// Write `value` at `key`, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageMediumError::Backend`] when the medium rejects the
    /// write (for example, when full).
    fn write(&self, key: &StorageKey, value: String) -> Result<(), StorageMediumError>;

    /// Remove the record at `key`. Absent records are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageMediumError::Backend`] when the medium cannot be
    /// mutated.
    fn remove(&self, key: &StorageKey) -> Result<(), StorageMediumError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::ResourceKind;

    #[test]
    fn mock_medium_supports_scripted_reads() {
        let mut medium = MockStorageMedium::new();
        medium
            .expect_read()
            .times(1)
            .return_once(|_| Ok(Some("[]".to_owned())));

        let value = medium
            .read(&StorageKey::global(ResourceKind::Tasks))
            .expect("read succeeds");
        assert_eq!(value.as_deref(), Some("[]"));
    }

    #[test]
    fn backend_error_carries_the_message() {
        let err = StorageMediumError::backend("medium full");
        assert_eq!(err.to_string(), "storage medium failure: medium full");
    }
}
