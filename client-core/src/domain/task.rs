//! Task aggregate and its step records.
//!
//! A task owns an ordered sequence of steps. Steps live and die with their
//! parent: they are attached at creation time and replaced-by-merge on
//! update. Completion is terminal: the task is removed from the active
//! collection rather than archived, so a completed task is never queryable
//! again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Error, UserId};

/// A single actionable step inside a task.
///
/// Steps carry a zero-based `order_index` matching the order they were
/// supplied at creation; updates never reorder them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique step identifier within the user's task collection.
    pub id: i64,
    /// Parent task identifier.
    pub task_id: i64,
    /// What to do. Never empty.
    pub description: String,
    /// Materials or resources needed, when any.
    pub materials: Option<String>,
    /// Zero-based position in the parent task.
    pub order_index: u32,
    /// Whether the step has been ticked off.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A task owned by a user, with its attached steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier within the user's collection.
    pub id: i64,
    /// Owning user.
    pub user_id: UserId,
    /// Task title. Never empty.
    pub title: String,
    /// Estimated effort in minutes. Always positive.
    pub estimated_minutes: u32,
    /// Completion flag. Completed tasks are removed from storage, so a
    /// stored task always has this set to `false`; the flag only flips on
    /// the snapshot returned by the completion operation.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Ordered steps.
    pub steps: Vec<Step>,
}

/// Input for a step attached at task creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    /// What to do. Never empty.
    pub description: String,
    /// Materials or resources needed, when any.
    pub materials: Option<String>,
}

impl StepDraft {
    /// Validate and construct a step draft.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the
    /// description is empty after trimming.
    pub fn try_new(
        description: impl Into<String>,
        materials: Option<String>,
    ) -> Result<Self, Error> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(Error::invalid_request("step description cannot be empty"));
        }
        Ok(Self {
            description,
            materials,
        })
    }
}

/// Validated input for creating a task.
///
/// # Examples
/// ```
/// use client_core::domain::{StepDraft, TaskDraft};
///
/// let draft = TaskDraft::try_new(
///     "Essay",
///     60,
///     vec![StepDraft::try_new("Outline", None).expect("valid step")],
/// )
/// .expect("valid draft");
/// assert_eq!(draft.estimated_minutes, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title. Never empty.
    pub title: String,
    /// Estimated effort in minutes. Always positive.
    pub estimated_minutes: u32,
    /// Steps in the order they should appear.
    pub steps: Vec<StepDraft>,
}

impl TaskDraft {
    /// Validate and construct a task draft.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the title is
    /// empty after trimming or the estimate is zero.
    pub fn try_new(
        title: impl Into<String>,
        estimated_minutes: u32,
        steps: Vec<StepDraft>,
    ) -> Result<Self, Error> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::invalid_request("task title cannot be empty"));
        }
        if estimated_minutes == 0 {
            return Err(Error::invalid_request(
                "estimated minutes must be a positive number",
            ));
        }
        Ok(Self {
            title,
            estimated_minutes,
            steps,
        })
    }
}

/// Completion flag for a single existing step, referenced by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    /// The step to update.
    pub id: i64,
    /// New completion state.
    pub completed: bool,
}

/// Partial update applied to an existing task.
///
/// Only the fields present are touched. Steps merge by id against the stored
/// list: `description`, `materials`, `order_index`, and `created_at` are
/// preserved from the prior record and only `completed` is overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    /// The task to update.
    pub task_id: i64,
    /// New completion flag, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// Step completion flags to merge, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepStatus>>,
}

/// Result of completing a task: the pre-removal snapshot plus the award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTask {
    /// Snapshot of the task as it was just before removal, with
    /// `completed` set.
    pub task: Task,
    /// Kaiblooms credited for the completion.
    pub kaiblooms_awarded: u32,
}
