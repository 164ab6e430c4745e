//! Driving port for the task lifecycle.
//!
//! Implemented by the local repository and by the fallback gateway, so UI
//! collaborators never know which path served a call.

use async_trait::async_trait;

use crate::domain::{CompletedTask, Error, Task, TaskDraft, TaskUpdate, UserId};

/// Port for task creation, listing, update, completion, and removal.
///
/// # Lifecycle
///
/// A task is `Active` until completed or removed; both transitions are
/// terminal and delete the record. Completed tasks are not retained and are
/// never queryable afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskOperations: Send + Sync {
    /// All active tasks for `user`, in stored insertion order.
    async fn list_tasks(&self, user: UserId) -> Result<Vec<Task>, Error>;

    /// Create a task from a validated draft and return it.
    async fn create_task(&self, user: UserId, draft: TaskDraft) -> Result<Task, Error>;

    /// Apply a partial update. A missing task is logged and silently
    /// ignored; this is not the completion path.
    async fn update_task(&self, user: UserId, update: TaskUpdate) -> Result<(), Error>;

    /// Complete a task: award Kaiblooms, remove the task, and return the
    /// pre-removal snapshot plus the award.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the task does
    /// not exist (including a repeated completion of the same id).
    async fn complete_task(&self, user: UserId, task_id: i64) -> Result<CompletedTask, Error>;

    /// Remove a task unconditionally. A no-op when absent.
    async fn remove_task(&self, user: UserId, task_id: i64) -> Result<(), Error>;
}

/// Fixture implementation backed by no storage at all.
///
/// Lists are empty, mutations are accepted and discarded, and completion
/// reports `NotFound`. Use it in unit tests where task behaviour is not
/// under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTaskOperations;

#[async_trait]
impl TaskOperations for FixtureTaskOperations {
    async fn list_tasks(&self, _user: UserId) -> Result<Vec<Task>, Error> {
        Ok(Vec::new())
    }

    async fn create_task(&self, user: UserId, draft: TaskDraft) -> Result<Task, Error> {
        let now = chrono::Utc::now();
        Ok(Task {
            id: 1,
            user_id: user,
            title: draft.title,
            estimated_minutes: draft.estimated_minutes,
            completed: false,
            created_at: now,
            steps: Vec::new(),
        })
    }

    async fn update_task(&self, _user: UserId, _update: TaskUpdate) -> Result<(), Error> {
        Ok(())
    }

    async fn complete_task(&self, _user: UserId, task_id: i64) -> Result<CompletedTask, Error> {
        Err(Error::not_found(format!("task {task_id} not found")))
    }

    async fn remove_task(&self, _user: UserId, _task_id: i64) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;

    fn user() -> UserId {
        UserId::try_new(1).expect("positive id")
    }

    #[tokio::test]
    async fn fixture_lists_no_tasks() {
        let ops = FixtureTaskOperations;
        let tasks = ops.list_tasks(user()).await.expect("list succeeds");
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn fixture_echoes_created_drafts() {
        let ops = FixtureTaskOperations;
        let draft = TaskDraft::try_new("Essay", 60, vec![]).expect("valid draft");
        let task = ops.create_task(user(), draft).await.expect("create succeeds");
        assert_eq!(task.title, "Essay");
        assert_eq!(task.estimated_minutes, 60);
    }

    #[tokio::test]
    async fn fixture_completion_reports_not_found() {
        let ops = FixtureTaskOperations;
        let err = ops.complete_task(user(), 9).await.expect_err("no tasks");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
