use crate::app::backend::Backend;
use crate::error::{BackendError, IngestError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// The backend slot shared between an attendant and its request handlers.
pub type BackendSlot = Arc<RwLock<Option<Arc<dyn Backend>>>>;

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendSlot,
}

impl AppState {
    pub fn new(backend: BackendSlot) -> Self {
        Self { backend }
    }

    /// The currently bound backend.
    pub async fn backend(&self) -> Result<Arc<dyn Backend>, BackendError> {
        self.backend.read().await.clone().ok_or(BackendError::Unbound)
    }
}

#[derive(Serialize, Debug)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_string()),
        }
    }
}

// Every failure is the producer's problem; only the category goes back on the
// wire, the detail goes to the log.
impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let message = match &self {
            IngestError::Transport(_) => "invalid request body",
            IngestError::Decode(_) => "malformed record",
            IngestError::Validation => "invalid record",
            IngestError::Backend(_) => "record rejected",
        };
        warn!(error = %self, "rejecting request");
        (StatusCode::BAD_REQUEST, Json(ApiResponse::failed(message))).into_response()
    }
}
