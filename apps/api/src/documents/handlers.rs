use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::documents::{store_document, UploadedDocument};
use crate::errors::AppError;
use crate::models::document::{DocumentKind, DocumentRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StoreDocumentRequest {
    pub kind: DocumentKind,
    #[serde(flatten)]
    pub document: UploadedDocument,
}

#[derive(Debug, Serialize)]
pub struct StoreDocumentResponse {
    pub id: Uuid,
    pub kind: DocumentKind,
}

#[derive(Debug, Deserialize)]
pub struct KindQuery {
    pub kind: DocumentKind,
}

/// POST /api/v1/documents
pub async fn handle_store_document(
    State(state): State<AppState>,
    Json(req): Json<StoreDocumentRequest>,
) -> Result<(StatusCode, Json<StoreDocumentResponse>), AppError> {
    let id = store_document(
        state.pipeline.documents.as_ref(),
        state.owner_id,
        req.kind,
        &req.document,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(StoreDocumentResponse { id, kind: req.kind }),
    ))
}

/// GET /api/v1/documents/latest?kind=resume
pub async fn handle_latest_document(
    State(state): State<AppState>,
    Query(params): Query<KindQuery>,
) -> Result<Json<DocumentRow>, AppError> {
    let doc = state
        .pipeline
        .documents
        .latest(state.owner_id, params.kind)
        .await?;
    Ok(Json(doc))
}
