//! `PUT /` registers a record's shape, `POST /` stores its values.

use crate::domain::Record;
use crate::error::IngestError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_LENGTH;
use axum::http::HeaderMap;
use axum::Json;

#[derive(Debug, Clone, Copy)]
enum Operation {
    Register,
    Store,
}

pub async fn register_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse>, IngestError> {
    ingest(&state, &headers, &body, Operation::Register).await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn store_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse>, IngestError> {
    ingest(&state, &headers, &body, Operation::Store).await?;
    Ok(Json(ApiResponse::ok()))
}

async fn ingest(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
    operation: Operation,
) -> Result<(), IngestError> {
    check_length(headers, body)?;

    let record = Record::from_json(body)?;
    if !record.is_valid() {
        return Err(IngestError::Validation);
    }

    let backend = state.backend().await?;
    match operation {
        Operation::Register => backend.register(record).await?,
        Operation::Store => backend.store(record).await?,
    }
    Ok(())
}

/// The body must be exactly as long as the declared `Content-Length`.
fn check_length(headers: &HeaderMap, body: &[u8]) -> Result<(), IngestError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .ok_or_else(|| IngestError::Transport("missing content-length".into()))?
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or_else(|| IngestError::Transport("unparsable content-length".into()))?;

    if declared != body.len() {
        return Err(IngestError::Transport(format!(
            "content-length {declared} but read {} bytes",
            body.len()
        )));
    }
    Ok(())
}
