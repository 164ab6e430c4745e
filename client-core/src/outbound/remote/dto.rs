//! DTOs for the remote API wire format.
//!
//! Stored records already serialise as camelCase JSON, so most responses
//! decode straight into domain types. The DTOs here cover the places where
//! the wire shape diverges: request envelopes for drafts (which carry no
//! serde derives) and response envelopes that wrap or extend a record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CompletedTask, PurchaseOutcome, ReflectionDraft, ReflectionEntry, Sentiment, StepDraft,
    Task, TaskDraft, UserId,
};

/// Request body for task creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateTaskBodyDto {
    pub(super) title: String,
    pub(super) estimated_minutes: u32,
    pub(super) steps: Vec<CreateStepBodyDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateStepBodyDto {
    pub(super) description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) materials: Option<String>,
}

impl From<&TaskDraft> for CreateTaskBodyDto {
    fn from(draft: &TaskDraft) -> Self {
        Self {
            title: draft.title.clone(),
            estimated_minutes: draft.estimated_minutes,
            steps: draft.steps.iter().map(CreateStepBodyDto::from).collect(),
        }
    }
}

impl From<&StepDraft> for CreateStepBodyDto {
    fn from(step: &StepDraft) -> Self {
        Self {
            description: step.description.clone(),
            materials: step.materials.clone(),
        }
    }
}

/// Response body for the task update endpoint, which doubles as the
/// completion endpoint: a completing update also reports the award.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdatedTaskDto {
    #[serde(flatten)]
    pub(super) task: Task,
    pub(super) kaiblooms_awarded: Option<u32>,
}

impl UpdatedTaskDto {
    pub(super) fn into_completed_task(self) -> CompletedTask {
        CompletedTask {
            task: self.task,
            kaiblooms_awarded: self.kaiblooms_awarded.unwrap_or_default(),
        }
    }
}

/// Request body for a collectible purchase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PurchaseBodyDto {
    pub(super) collectible_type_id: i64,
}

/// Response body for a collectible purchase. The wire envelope also carries
/// a `success` flag, which is redundant next to the HTTP status and ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PurchaseResponseDto {
    pub(super) new_points: u32,
}

impl PurchaseResponseDto {
    pub(super) fn into_outcome(self) -> PurchaseOutcome {
        PurchaseOutcome {
            new_balance: self.new_points,
        }
    }
}

/// Request body for appending a reflection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReflectionBodyDto {
    pub(super) task_id: i64,
    pub(super) emoji_rating: u8,
    pub(super) reflection_text: String,
}

impl From<&ReflectionDraft> for ReflectionBodyDto {
    fn from(draft: &ReflectionDraft) -> Self {
        Self {
            task_id: draft.task_id,
            emoji_rating: draft.emoji_rating,
            reflection_text: draft.reflection_text.clone(),
        }
    }
}

/// Reflection entry as the remote serves it. The append endpoint omits the
/// task title, which the log endpoint includes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReflectionDto {
    pub(super) id: i64,
    pub(super) user_id: UserId,
    pub(super) task_id: i64,
    pub(super) emoji_rating: u8,
    pub(super) reflection_text: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) sentiment: Sentiment,
    pub(super) task_title: Option<String>,
}

impl ReflectionDto {
    pub(super) fn into_domain(self) -> ReflectionEntry {
        let task_title = self
            .task_title
            .unwrap_or_else(|| format!("Task {}", self.task_id));
        ReflectionEntry {
            id: self.id,
            user_id: self.user_id,
            task_id: self.task_id,
            emoji_rating: self.emoji_rating,
            reflection_text: self.reflection_text,
            created_at: self.created_at,
            sentiment: self.sentiment,
            task_title,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn create_body_serialises_camel_case_and_omits_absent_materials() {
        let draft = TaskDraft::try_new(
            "Essay",
            60,
            vec![StepDraft::try_new("Outline", None).expect("valid step")],
        )
        .expect("valid draft");

        let encoded = serde_json::to_value(CreateTaskBodyDto::from(&draft)).expect("serialise");
        assert_eq!(
            encoded,
            json!({
                "title": "Essay",
                "estimatedMinutes": 60,
                "steps": [{ "description": "Outline" }],
            })
        );
    }

    #[test]
    fn updated_task_decodes_the_flattened_award() {
        let decoded: UpdatedTaskDto = serde_json::from_value(json!({
            "id": 3,
            "userId": 1,
            "title": "Essay",
            "estimatedMinutes": 60,
            "completed": true,
            "createdAt": "2026-08-30T09:00:00Z",
            "steps": [],
            "kaibloomsAwarded": 50,
        }))
        .expect("deserialise");

        let completed = decoded.into_completed_task();
        assert_eq!(completed.kaiblooms_awarded, 50);
        assert!(completed.task.completed);
    }

    #[test]
    fn reflection_without_a_title_gets_the_placeholder() {
        let decoded: ReflectionDto = serde_json::from_value(json!({
            "id": 1,
            "userId": 1,
            "taskId": 42,
            "emojiRating": 4,
            "reflectionText": "went well",
            "createdAt": "2026-08-30T09:00:00Z",
            "sentiment": "positive",
        }))
        .expect("deserialise");

        assert_eq!(decoded.into_domain().task_title, "Task 42");
    }

    #[test]
    fn purchase_response_maps_new_points_to_the_balance() {
        let decoded: PurchaseResponseDto =
            serde_json::from_value(json!({ "success": true, "newPoints": 450 }))
                .expect("deserialise");
        assert_eq!(decoded.into_outcome().new_balance, 450);
    }
}
