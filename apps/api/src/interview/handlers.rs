//! Axum route handlers for the interview wizard.
//!
//! Every handler answers with the controller snapshot after the action, so the
//! client re-renders from one shape. On failure the error is returned and the
//! snapshot (via `GET /api/v1/interview`) carries it as `last_error`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::documents::UploadedDocument;
use crate::errors::AppError;
use crate::interview::controller::ControllerSnapshot;
use crate::models::interview::InterviewResponseRow;
use crate::state::AppState;

type SnapshotResult = Result<Json<ControllerSnapshot>, AppError>;

/// GET /api/v1/interview
pub async fn handle_snapshot(State(state): State<AppState>) -> SnapshotResult {
    let controller = state.interviews.try_acquire(state.owner_id)?;
    Ok(Json(controller.snapshot()))
}

/// POST /api/v1/interview/start
pub async fn handle_start(State(state): State<AppState>) -> SnapshotResult {
    let mut controller = state.interviews.try_acquire(state.owner_id)?;
    controller.begin_upload()?;
    Ok(Json(controller.snapshot()))
}

#[derive(Debug, Deserialize)]
pub struct UploadDocumentsRequest {
    pub resume: UploadedDocument,
    pub job_description: UploadedDocument,
}

/// POST /api/v1/interview/documents
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Json(req): Json<UploadDocumentsRequest>,
) -> SnapshotResult {
    let mut controller = state.interviews.try_acquire(state.owner_id)?;
    controller
        .upload_and_analyze(&state.pipeline, &req.resume, &req.job_description)
        .await?;
    Ok(Json(controller.snapshot()))
}

#[derive(Debug, Deserialize)]
pub struct SelectPrincipleRequest {
    #[serde(default)]
    pub principle: Option<String>,
}

/// POST /api/v1/interview/principle
pub async fn handle_select_principle(
    State(state): State<AppState>,
    Json(req): Json<SelectPrincipleRequest>,
) -> SnapshotResult {
    let mut controller = state.interviews.try_acquire(state.owner_id)?;
    controller.select_principle(req.principle.as_deref())?;
    Ok(Json(controller.snapshot()))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub transcript: String,
    #[serde(default)]
    pub audio_reference: Option<String>,
}

/// POST /api/v1/interview/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> SnapshotResult {
    let mut controller = state.interviews.try_acquire(state.owner_id)?;
    controller
        .request_feedback(&state.pipeline, &req.transcript, req.audio_reference)
        .await?;
    Ok(Json(controller.snapshot()))
}

/// POST /api/v1/interview/next
pub async fn handle_next(State(state): State<AppState>) -> SnapshotResult {
    let mut controller = state.interviews.try_acquire(state.owner_id)?;
    controller.advance(&state.pipeline).await?;
    Ok(Json(controller.snapshot()))
}

/// POST /api/v1/interview/reset
pub async fn handle_reset(State(state): State<AppState>) -> SnapshotResult {
    let mut controller = state.interviews.try_acquire(state.owner_id)?;
    controller.start_new_session(&state.pipeline).await?;
    Ok(Json(controller.snapshot()))
}

#[derive(Debug, Serialize)]
pub struct RecordingResponse {
    pub audio_reference: String,
}

/// POST /api/v1/interview/recordings
///
/// Body is the raw audio. The returned reference is passed back with feedback.
pub async fn handle_upload_recording(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<RecordingResponse>), AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("Recording body is empty".to_string()));
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let audio_reference = state
        .recordings
        .put(state.owner_id, body, content_type)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordingResponse { audio_reference }),
    ))
}

/// GET /api/v1/interview/sessions/:id/responses
pub async fn handle_list_responses(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<InterviewResponseRow>>, AppError> {
    let rows = state.pipeline.sessions.list_responses(session_id).await?;
    Ok(Json(rows))
}
