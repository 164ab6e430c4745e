//! Local append-only reflection log over the typed store.
//!
//! New entries are prepended so the stored list reads most-recent-first.
//! The reflected task's title is captured into the entry at append time:
//! reflections outlive the tasks they describe.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ReflectionOperations, ResourceKind, StorageKey, StorageMedium,
};
use crate::domain::{
    Error, ReflectionDraft, ReflectionEntry, Sentiment, Task, UserId,
};
use crate::outbound::storage::Store;

/// Repository owning each user's reflection log.
pub struct ReflectionLog<M> {
    store: Store<M>,
    clock: Arc<dyn Clock>,
}

impl<M> Clone for ReflectionLog<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M: StorageMedium> ReflectionLog<M> {
    /// Create a log over `store`.
    pub fn new(store: Store<M>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn key(user: UserId) -> StorageKey {
        StorageKey::scoped(ResourceKind::Reflections, user)
    }

    fn load(&self, user: UserId) -> Vec<ReflectionEntry> {
        self.store.load(&Self::key(user), Vec::new())
    }

    fn task_title(&self, user: UserId, task_id: i64) -> String {
        let tasks: Vec<Task> = self
            .store
            .load(&StorageKey::scoped(ResourceKind::Tasks, user), Vec::new());
        tasks
            .iter()
            .find(|task| task.id == task_id)
            .map(|task| task.title.clone())
            .unwrap_or_else(|| format!("Task {task_id}"))
    }
}

#[async_trait]
impl<M: StorageMedium> ReflectionOperations for ReflectionLog<M> {
    async fn append_reflection(
        &self,
        user: UserId,
        draft: ReflectionDraft,
    ) -> Result<ReflectionEntry, Error> {
        // Draft fields are public; re-run validation so forged input
        // fails closed.
        let draft = ReflectionDraft::try_new(
            draft.task_id,
            draft.emoji_rating,
            draft.reflection_text,
        )?;

        let mut entries = self.load(user);
        let entry = ReflectionEntry {
            id: entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1,
            user_id: user,
            task_id: draft.task_id,
            emoji_rating: draft.emoji_rating,
            reflection_text: draft.reflection_text,
            created_at: self.clock.utc(),
            sentiment: Sentiment::from_rating(draft.emoji_rating),
            task_title: self.task_title(user, draft.task_id),
        };

        entries.insert(0, entry.clone());
        self.store.save(&Self::key(user), &entries);
        info!(
            user = %user,
            entry_id = entry.id,
            task_id = entry.task_id,
            sentiment = ?entry.sentiment,
            "appended reflection"
        );
        Ok(entry)
    }

    async fn list_reflections(&self, user: UserId) -> Result<Vec<ReflectionEntry>, Error> {
        Ok(self.load(user))
    }
}
