//! Local task repository over the typed store.
//!
//! Owns the per-user task collection. Completion is coupled to the ledger:
//! the award is credited before the task is removed, and the returned
//! snapshot carries both.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    ProgressOperations, ResourceKind, StorageKey, StorageMedium, TaskOperations,
};
use crate::domain::{
    CompletedTask, Error, Step, StepDraft, Task, TaskDraft, TaskUpdate, UserId,
};
use crate::outbound::persistence::ProgressLedger;
use crate::outbound::storage::Store;

/// Repository owning the task collection and its step records.
pub struct TaskRepository<M> {
    store: Store<M>,
    ledger: ProgressLedger<M>,
    clock: Arc<dyn Clock>,
}

impl<M> Clone for TaskRepository<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ledger: self.ledger.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M: StorageMedium> TaskRepository<M> {
    /// Create a repository over `store`, crediting awards through `ledger`.
    pub fn new(store: Store<M>, ledger: ProgressLedger<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ledger,
            clock,
        }
    }

    fn key(user: UserId) -> StorageKey {
        StorageKey::scoped(ResourceKind::Tasks, user)
    }

    fn load(&self, user: UserId) -> Vec<Task> {
        self.store.load(&Self::key(user), Vec::new())
    }

    fn next_task_id(tasks: &[Task]) -> i64 {
        tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
    }

    fn next_step_id(tasks: &[Task]) -> i64 {
        tasks
            .iter()
            .flat_map(|task| task.steps.iter())
            .map(|step| step.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Drafts arrive pre-validated from the UI, but the fields are public;
    /// re-run the checks so forged input fails closed.
    fn revalidate(draft: TaskDraft) -> Result<TaskDraft, Error> {
        let TaskDraft {
            title,
            estimated_minutes,
            steps,
        } = draft;
        let steps = steps
            .into_iter()
            .map(|step| StepDraft::try_new(step.description, step.materials))
            .collect::<Result<Vec<_>, _>>()?;
        TaskDraft::try_new(title, estimated_minutes, steps)
    }
}

#[async_trait]
impl<M: StorageMedium> TaskOperations for TaskRepository<M> {
    async fn list_tasks(&self, user: UserId) -> Result<Vec<Task>, Error> {
        Ok(self.load(user))
    }

    async fn create_task(&self, user: UserId, draft: TaskDraft) -> Result<Task, Error> {
        let draft = Self::revalidate(draft)?;
        let mut tasks = self.load(user);
        let task_id = Self::next_task_id(&tasks);
        let first_step_id = Self::next_step_id(&tasks);
        let now = self.clock.utc();

        let steps = draft
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| Step {
                id: first_step_id + index as i64,
                task_id,
                description: step.description,
                materials: step.materials,
                order_index: u32::try_from(index).unwrap_or(u32::MAX),
                completed: false,
                created_at: now,
            })
            .collect();

        let task = Task {
            id: task_id,
            user_id: user,
            title: draft.title,
            estimated_minutes: draft.estimated_minutes,
            completed: false,
            created_at: now,
            steps,
        };

        tasks.push(task.clone());
        self.store.save(&Self::key(user), &tasks);
        info!(user = %user, task_id, steps = task.steps.len(), "created task");
        Ok(task)
    }

    async fn update_task(&self, user: UserId, update: TaskUpdate) -> Result<(), Error> {
        let mut tasks = self.load(user);
        let Some(task) = tasks.iter_mut().find(|task| task.id == update.task_id) else {
            warn!(user = %user, task_id = update.task_id, "update for unknown task ignored");
            return Ok(());
        };

        if let Some(completed) = update.completed {
            task.completed = completed;
        }
        if let Some(statuses) = update.steps {
            for status in statuses {
                match task.steps.iter_mut().find(|step| step.id == status.id) {
                    Some(step) => step.completed = status.completed,
                    None => {
                        warn!(
                            user = %user,
                            task_id = update.task_id,
                            step_id = status.id,
                            "step status for unknown step ignored"
                        );
                    }
                }
            }
        }

        self.store.save(&Self::key(user), &tasks);
        Ok(())
    }

    async fn complete_task(&self, user: UserId, task_id: i64) -> Result<CompletedTask, Error> {
        let mut tasks = self.load(user);
        let Some(position) = tasks.iter().position(|task| task.id == task_id) else {
            return Err(Error::not_found(format!("task {task_id} not found")));
        };

        // Award before removal so the snapshot and the credit stay coupled.
        let estimated_minutes = tasks
            .get(position)
            .map(|task| task.estimated_minutes)
            .unwrap_or_default();
        let kaiblooms_awarded = self.ledger.award(user, estimated_minutes).await?;

        let mut task = tasks.remove(position);
        task.completed = true;
        self.store.save(&Self::key(user), &tasks);
        info!(user = %user, task_id, kaiblooms_awarded, "completed and removed task");

        Ok(CompletedTask {
            task,
            kaiblooms_awarded,
        })
    }

    async fn remove_task(&self, user: UserId, task_id: i64) -> Result<(), Error> {
        let mut tasks = self.load(user);
        tasks.retain(|task| task.id != task_id);
        self.store.save(&Self::key(user), &tasks);
        Ok(())
    }
}
