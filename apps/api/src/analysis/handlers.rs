//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::fallback::fallback_questions;
use crate::analysis::models::{LeadershipPrinciple, Question};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_content: String,
    pub job_description_content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub principles: Vec<LeadershipPrinciple>,
    pub questions: Vec<Question>,
    /// True when the generator wrote no questions and the static bank was used.
    pub used_fallback_questions: bool,
}

/// POST /api/v1/analysis
///
/// Stateless analysis of a document pair. Nothing is persisted.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = state
        .pipeline
        .analyzer
        .analyze(&req.resume_content, &req.job_description_content)
        .await?;

    let used_fallback_questions = analysis.questions.is_empty();
    let questions = if used_fallback_questions {
        fallback_questions(&analysis.principles)
    } else {
        analysis.questions
    };

    Ok(Json(AnalyzeResponse {
        principles: analysis.principles,
        questions,
        used_fallback_questions,
    }))
}
