//! Remote API transport: reqwest client and wire DTOs.

mod dto;
mod http_client;

pub use self::http_client::{RemoteApi, RemoteApiError};
