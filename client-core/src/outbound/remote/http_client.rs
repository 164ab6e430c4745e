//! Reqwest-backed remote API client.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into domain records. Policy
//! (when to fall back to local storage) lives in the gateway.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ports::define_port_error;
use crate::domain::{
    CollectibleType, CompletedTask, KaibloomBalance, OwnedCollectible, PurchaseOutcome,
    ReflectionDraft, ReflectionEntry, SettingsPatch, Task, TaskDraft, TaskUpdate, UserSettings,
};

use super::dto::{
    CreateTaskBodyDto, PurchaseBodyDto, PurchaseResponseDto, ReflectionBodyDto, ReflectionDto,
    UpdatedTaskDto,
};

define_port_error! {
    /// Failure classes for remote API calls.
    pub enum RemoteApiError {
        /// Connection or request-level transport failure.
        Transport { message: String } => "remote transport failure: {message}",
        /// The request did not complete within the configured timeout.
        Timeout { message: String } => "remote request timed out: {message}",
        /// The remote answered with a non-success status.
        Status { status: u16, message: String } => "remote status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "remote payload invalid: {message}",
    }
}

impl RemoteApiError {
    /// Whether a failure of this class should trigger local fallback.
    ///
    /// Every current class is fallback-eligible; the exhaustive match forces
    /// a decision for any future variant.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. }
            | Self::Timeout { .. }
            | Self::Status { .. }
            | Self::Decode { .. } => true,
        }
    }
}

/// HTTP client for the remote persistence API.
///
/// One method per endpoint. The session identifies the user, so no request
/// carries a user id.
#[derive(Debug, Clone)]
pub struct RemoteApi {
    client: Client,
    base_url: Url,
}

impl RemoteApi {
    /// Build a client against `base_url` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteApiError> {
        self.base_url
            .join(path)
            .map_err(|error| RemoteApiError::transport(error.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteApiError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteApiError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    /// `GET /_api/tasks`
    pub async fn list_tasks(&self) -> Result<Vec<Task>, RemoteApiError> {
        self.get_json("/_api/tasks").await
    }

    /// `POST /_api/tasks`
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, RemoteApiError> {
        self.post_json("/_api/tasks", &CreateTaskBodyDto::from(draft))
            .await
    }

    /// `POST /_api/tasks/update` carrying only step and flag changes.
    pub async fn update_task(&self, update: &TaskUpdate) -> Result<(), RemoteApiError> {
        let _: UpdatedTaskDto = self.post_json("/_api/tasks/update", update).await?;
        Ok(())
    }

    /// `POST /_api/tasks/update` with `completed: true`, which the remote
    /// treats as completion: it awards Kaiblooms and removes the task.
    pub async fn complete_task(&self, task_id: i64) -> Result<CompletedTask, RemoteApiError> {
        let body = TaskUpdate {
            task_id,
            completed: Some(true),
            steps: None,
        };
        let updated: UpdatedTaskDto = self.post_json("/_api/tasks/update", &body).await?;
        Ok(updated.into_completed_task())
    }

    /// `GET /_api/user-progress`
    pub async fn user_progress(&self) -> Result<KaibloomBalance, RemoteApiError> {
        self.get_json("/_api/user-progress").await
    }

    /// `GET /_api/collectibles`
    pub async fn collectible_catalog(&self) -> Result<Vec<CollectibleType>, RemoteApiError> {
        self.get_json("/_api/collectibles").await
    }

    /// `GET /_api/collectibles/user-collection`
    pub async fn user_collection(&self) -> Result<Vec<OwnedCollectible>, RemoteApiError> {
        self.get_json("/_api/collectibles/user-collection").await
    }

    /// `POST /_api/collectibles/purchase`
    pub async fn purchase(
        &self,
        collectible_type_id: i64,
    ) -> Result<PurchaseOutcome, RemoteApiError> {
        let body = PurchaseBodyDto {
            collectible_type_id,
        };
        let response: PurchaseResponseDto =
            self.post_json("/_api/collectibles/purchase", &body).await?;
        Ok(response.into_outcome())
    }

    /// `GET /_api/settings`
    pub async fn fetch_settings(&self) -> Result<UserSettings, RemoteApiError> {
        self.get_json("/_api/settings").await
    }

    /// `POST /_api/settings`
    pub async fn update_settings(
        &self,
        patch: &SettingsPatch,
    ) -> Result<UserSettings, RemoteApiError> {
        self.post_json("/_api/settings", patch).await
    }

    /// `POST /_api/settings/clear-data`
    pub async fn clear_data(&self) -> Result<(), RemoteApiError> {
        let response = self
            .client
            .post(self.endpoint("/_api/settings/clear-data")?)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }

    /// `POST /_api/reflections`
    pub async fn append_reflection(
        &self,
        draft: &ReflectionDraft,
    ) -> Result<ReflectionEntry, RemoteApiError> {
        let dto: ReflectionDto = self
            .post_json("/_api/reflections", &ReflectionBodyDto::from(draft))
            .await?;
        Ok(dto.into_domain())
    }

    /// `GET /_api/reflection-logs`
    pub async fn reflection_logs(&self) -> Result<Vec<ReflectionEntry>, RemoteApiError> {
        let dtos: Vec<ReflectionDto> = self.get_json("/_api/reflection-logs").await?;
        Ok(dtos.into_iter().map(ReflectionDto::into_domain).collect())
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RemoteApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref())
        .map_err(|error| RemoteApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> RemoteApiError {
    if error.is_timeout() {
        RemoteApiError::timeout(error.to_string())
    } else {
        RemoteApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteApiError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        "no response body".to_owned()
    } else {
        preview
    };
    RemoteApiError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
