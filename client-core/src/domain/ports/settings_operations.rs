//! Driving port for per-user settings and data clearing.

use async_trait::async_trait;

use crate::domain::{Error, SettingsPatch, UserId, UserSettings};

/// Port for settings reads, partial updates, and the clear-data sweep.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsOperations: Send + Sync {
    /// The user's settings, materialising the documented defaults on first
    /// access.
    async fn fetch_settings(&self, user: UserId) -> Result<UserSettings, Error>;

    /// Apply a partial update and return the full updated record.
    ///
    /// Only fields present in the patch are overwritten. Out-of-range
    /// values are rejected with
    /// [`crate::domain::ErrorCode::InvalidRequest`] before any mutation.
    async fn update_settings(
        &self,
        user: UserId,
        patch: SettingsPatch,
    ) -> Result<UserSettings, Error>;

    /// Remove every stored record belonging to `user` (tasks, settings,
    /// balance, inventory, reflections).
    async fn clear_data(&self, user: UserId) -> Result<(), Error>;
}
