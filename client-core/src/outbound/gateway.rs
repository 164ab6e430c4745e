//! Remote-first gateway with local fallback.
//!
//! Wraps a local implementation of the driving ports and tries the remote
//! API first for every operation that has an endpoint. Any retryable remote
//! failure is logged and absorbed; the caller sees only the typed result of
//! whichever path answered. Ledger mutations and task removal have no
//! remote endpoint and always run locally.

use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    CollectibleOperations, ProgressOperations, ReflectionOperations, SettingsOperations,
    TaskOperations,
};
use crate::domain::{
    CollectibleType, CompletedTask, Error, KaibloomBalance, OwnedCollectible, PurchaseOutcome,
    ReflectionDraft, ReflectionEntry, SettingsPatch, Task, TaskDraft, TaskUpdate, UserId,
    UserSettings,
};
use crate::outbound::remote::{RemoteApi, RemoteApiError};

/// Gateway that prefers the remote API and falls back to `local`.
pub struct RemoteFirst<L> {
    remote: RemoteApi,
    local: L,
}

impl<L> RemoteFirst<L> {
    /// Wrap `local` behind `remote`.
    pub fn new(remote: RemoteApi, local: L) -> Self {
        Self { remote, local }
    }
}

/// Await the remote call; on a retryable failure, log and await the local
/// one instead. The local future is lazy and only runs on fallback.
async fn remote_or_local<T>(
    operation: &'static str,
    remote: impl Future<Output = Result<T, RemoteApiError>> + Send,
    local: impl Future<Output = Result<T, Error>> + Send,
) -> Result<T, Error> {
    match remote.await {
        Ok(value) => Ok(value),
        Err(error) if error.is_retryable() => {
            warn!(operation, error = %error, "remote unavailable, using local storage");
            local.await
        }
        Err(error) => Err(Error::internal(error.to_string())),
    }
}

#[async_trait]
impl<L: TaskOperations> TaskOperations for RemoteFirst<L> {
    async fn list_tasks(&self, user: UserId) -> Result<Vec<Task>, Error> {
        remote_or_local(
            "list_tasks",
            self.remote.list_tasks(),
            self.local.list_tasks(user),
        )
        .await
    }

    async fn create_task(&self, user: UserId, draft: TaskDraft) -> Result<Task, Error> {
        remote_or_local(
            "create_task",
            self.remote.create_task(&draft),
            self.local.create_task(user, draft.clone()),
        )
        .await
    }

    async fn update_task(&self, user: UserId, update: TaskUpdate) -> Result<(), Error> {
        remote_or_local(
            "update_task",
            self.remote.update_task(&update),
            self.local.update_task(user, update.clone()),
        )
        .await
    }

    async fn complete_task(&self, user: UserId, task_id: i64) -> Result<CompletedTask, Error> {
        remote_or_local(
            "complete_task",
            self.remote.complete_task(task_id),
            self.local.complete_task(user, task_id),
        )
        .await
    }

    async fn remove_task(&self, user: UserId, task_id: i64) -> Result<(), Error> {
        // No remote endpoint: removal only happens through completion there.
        self.local.remove_task(user, task_id).await
    }
}

#[async_trait]
impl<L: ProgressOperations> ProgressOperations for RemoteFirst<L> {
    async fn balance(&self, user: UserId) -> Result<KaibloomBalance, Error> {
        remote_or_local(
            "balance",
            self.remote.user_progress(),
            self.local.balance(user),
        )
        .await
    }

    async fn award(&self, user: UserId, estimated_minutes: u32) -> Result<u32, Error> {
        // Ledger mutations have no endpoint of their own; the remote credits
        // and debits inside completion and purchase.
        self.local.award(user, estimated_minutes).await
    }

    async fn debit(&self, user: UserId, amount: u32) -> Result<KaibloomBalance, Error> {
        self.local.debit(user, amount).await
    }
}

#[async_trait]
impl<L: CollectibleOperations> CollectibleOperations for RemoteFirst<L> {
    async fn catalog(&self) -> Result<Vec<CollectibleType>, Error> {
        remote_or_local(
            "catalog",
            self.remote.collectible_catalog(),
            self.local.catalog(),
        )
        .await
    }

    async fn purchase(
        &self,
        user: UserId,
        collectible_type_id: i64,
    ) -> Result<PurchaseOutcome, Error> {
        remote_or_local(
            "purchase",
            self.remote.purchase(collectible_type_id),
            self.local.purchase(user, collectible_type_id),
        )
        .await
    }

    async fn collection(&self, user: UserId) -> Result<Vec<OwnedCollectible>, Error> {
        remote_or_local(
            "collection",
            self.remote.user_collection(),
            self.local.collection(user),
        )
        .await
    }
}

#[async_trait]
impl<L: SettingsOperations> SettingsOperations for RemoteFirst<L> {
    async fn fetch_settings(&self, user: UserId) -> Result<UserSettings, Error> {
        remote_or_local(
            "fetch_settings",
            self.remote.fetch_settings(),
            self.local.fetch_settings(user),
        )
        .await
    }

    async fn update_settings(
        &self,
        user: UserId,
        patch: SettingsPatch,
    ) -> Result<UserSettings, Error> {
        remote_or_local(
            "update_settings",
            self.remote.update_settings(&patch),
            self.local.update_settings(user, patch.clone()),
        )
        .await
    }

    async fn clear_data(&self, user: UserId) -> Result<(), Error> {
        remote_or_local(
            "clear_data",
            self.remote.clear_data(),
            self.local.clear_data(user),
        )
        .await
    }
}

#[async_trait]
impl<L: ReflectionOperations> ReflectionOperations for RemoteFirst<L> {
    async fn append_reflection(
        &self,
        user: UserId,
        draft: ReflectionDraft,
    ) -> Result<ReflectionEntry, Error> {
        remote_or_local(
            "append_reflection",
            self.remote.append_reflection(&draft),
            self.local.append_reflection(user, draft.clone()),
        )
        .await
    }

    async fn list_reflections(&self, user: UserId) -> Result<Vec<ReflectionEntry>, Error> {
        remote_or_local(
            "list_reflections",
            self.remote.reflection_logs(),
            self.local.list_reflections(user),
        )
        .await
    }
}
