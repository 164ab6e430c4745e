//! Journal analysis types and the planner that turns analysis output into
//! tasks.
//!
//! The analysis itself comes from the external text-analysis collaborator;
//! this module only shapes its output and drives task creation through the
//! task port. Step generation failures abort the creation, so a task is
//! never silently created without the steps the caller asked for.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::ports::{TaskOperations, TextAnalysis, TextAnalysisError};
use super::{Error, Task, TaskDraft, UserId};

/// One scheduled block suggested by the analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// The task being scheduled.
    pub task: String,
    /// Suggested start time, free-form.
    pub start: String,
    /// Suggested end time, free-form.
    pub end: String,
    /// Deadline the block works toward, free-form.
    pub deadline: String,
    /// Subtasks inside the block.
    pub subtasks: Vec<String>,
}

/// Strategies for working around one identified obstacle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleStrategies {
    /// The obstacle itself.
    pub obstacle: String,
    /// Suggested strategies, in preference order.
    pub strategies: Vec<String>,
}

/// Structured output of a journal analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalAnalysis {
    /// Actionable tasks extracted from the text.
    pub tasks: Vec<String>,
    /// Deadlines keyed by task.
    pub deadlines: BTreeMap<String, String>,
    /// Obstacles the text mentions.
    pub obstacles: Vec<String>,
    /// Suggested schedule blocks.
    pub schedule: Vec<ScheduleEntry>,
    /// Per-obstacle coping strategies.
    pub obstacle_strategies: Vec<ObstacleStrategies>,
    /// Prose summary of the analysis.
    pub feedback_summary: String,
}

/// A task the planner should create: a title plus an effort estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    /// Task title.
    pub title: String,
    /// Estimated effort in minutes.
    pub estimated_minutes: u32,
}

/// Drives the text-analysis collaborator and the task port to turn journal
/// output into stored tasks.
pub struct JournalPlanner<A: ?Sized, T: ?Sized> {
    analysis: Arc<A>,
    tasks: Arc<T>,
}

impl<A: ?Sized, T: ?Sized> Clone for JournalPlanner<A, T> {
    fn clone(&self) -> Self {
        Self {
            analysis: Arc::clone(&self.analysis),
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<A: ?Sized, T: ?Sized> JournalPlanner<A, T> {
    /// Create a planner over the given collaborators.
    pub fn new(analysis: Arc<A>, tasks: Arc<T>) -> Self {
        Self { analysis, tasks }
    }
}

impl<A, T> JournalPlanner<A, T>
where
    A: TextAnalysis + ?Sized,
    T: TaskOperations + ?Sized,
{
    fn map_analysis_error(error: TextAnalysisError) -> Error {
        match error {
            TextAnalysisError::Unavailable { message } => {
                Error::internal(format!("text analysis unavailable: {message}"))
            }
            TextAnalysisError::Decode { message } => {
                Error::internal(format!("text analysis produced invalid output: {message}"))
            }
        }
    }

    /// Analyse journal text.
    ///
    /// # Errors
    ///
    /// Maps collaborator failures to
    /// [`crate::domain::ErrorCode::InternalError`].
    pub async fn analyze(&self, text: &str) -> Result<JournalAnalysis, Error> {
        if text.trim().is_empty() {
            return Err(Error::invalid_request("journal text cannot be empty"));
        }
        self.analysis
            .analyze(text)
            .await
            .map_err(Self::map_analysis_error)
    }

    /// Generate steps for `planned`, then create the task through the task
    /// port.
    ///
    /// # Errors
    ///
    /// Propagates draft validation failures and collaborator failures; no
    /// task is created when step generation fails.
    pub async fn create_task_from_journal(
        &self,
        user: UserId,
        planned: PlannedTask,
    ) -> Result<Task, Error> {
        let steps = self
            .analysis
            .generate_steps(&planned.title)
            .await
            .map_err(Self::map_analysis_error)?;
        let draft = TaskDraft::try_new(planned.title, planned.estimated_minutes, steps)?;
        let task = self.tasks.create_task(user, draft).await?;
        info!(user = %user, task_id = task.id, "created task from journal");
        Ok(task)
    }

    /// Create several planned tasks sequentially, stopping at the first
    /// failure. Returns the tasks created so far on success.
    ///
    /// # Errors
    ///
    /// Propagates the first creation failure; earlier creations are kept.
    pub async fn create_tasks_from_journal(
        &self,
        user: UserId,
        planned: Vec<PlannedTask>,
    ) -> Result<Vec<Task>, Error> {
        let mut created = Vec::with_capacity(planned.len());
        for entry in planned {
            created.push(self.create_task_from_journal(user, entry).await?);
        }
        Ok(created)
    }
}
