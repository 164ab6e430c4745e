//! Local settings repository over the typed store.
//!
//! Fetching settings for a user with no stored record yields the defaults
//! without persisting them; only an explicit update writes a record. The
//! repository also hosts the clear-data operation, which wipes every stored
//! resource for the user.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ResourceKind, SettingsOperations, StorageKey, StorageMedium,
};
use crate::domain::{Error, SettingsPatch, UserId, UserSettings};
use crate::outbound::storage::Store;

/// Repository owning each user's settings record and the clear-data wipe.
pub struct SettingsRepository<M> {
    store: Store<M>,
    clock: Arc<dyn Clock>,
}

impl<M> Clone for SettingsRepository<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M: StorageMedium> SettingsRepository<M> {
    /// Create a repository over `store`.
    pub fn new(store: Store<M>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn key(user: UserId) -> StorageKey {
        StorageKey::scoped(ResourceKind::Settings, user)
    }

    fn current(&self, user: UserId) -> UserSettings {
        self.store
            .load::<Option<UserSettings>>(&Self::key(user), None)
            .unwrap_or_else(|| UserSettings::new_default(user, self.clock.utc()))
    }
}

#[async_trait]
impl<M: StorageMedium> SettingsOperations for SettingsRepository<M> {
    async fn fetch_settings(&self, user: UserId) -> Result<UserSettings, Error> {
        Ok(self.current(user))
    }

    async fn update_settings(
        &self,
        user: UserId,
        patch: SettingsPatch,
    ) -> Result<UserSettings, Error> {
        patch.validate()?;
        let updated = self.current(user).apply(patch, self.clock.utc());
        self.store.save(&Self::key(user), &updated);
        Ok(updated)
    }

    async fn clear_data(&self, user: UserId) -> Result<(), Error> {
        for kind in ResourceKind::ALL {
            self.store.remove(&StorageKey::scoped(kind, user));
        }
        info!(user = %user, "cleared all stored data");
        Ok(())
    }
}
