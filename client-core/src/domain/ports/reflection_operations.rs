//! Driving port for the append-only reflection log.

use async_trait::async_trait;

use crate::domain::{Error, ReflectionDraft, ReflectionEntry, UserId};

/// Port for appending and listing reflections.
///
/// Entries are immutable once appended and the log is most-recent-first.
/// No retention policy applies; unbounded growth is accepted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReflectionOperations: Send + Sync {
    /// Append a reflection, deriving its sentiment and capturing the task
    /// title, and return the stored entry.
    async fn append_reflection(
        &self,
        user: UserId,
        draft: ReflectionDraft,
    ) -> Result<ReflectionEntry, Error>;

    /// The user's reflections, most recent first.
    async fn list_reflections(&self, user: UserId) -> Result<Vec<ReflectionEntry>, Error>;
}
