//! Axum route handlers for the stateless evaluation endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::{EvaluationInput, ScoreReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CondenseRequest {
    pub resume_text: String,
    pub question_text: String,
    #[serde(default)]
    pub leadership_principle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CondenseResponse {
    pub condensed_resume: String,
    pub original_words: usize,
    pub condensed_words: usize,
    pub reduction_percent: u32,
    pub truncated: bool,
}

/// POST /api/v1/resume/condense
pub async fn handle_condense(
    State(state): State<AppState>,
    Json(req): Json<CondenseRequest>,
) -> Result<Json<CondenseResponse>, AppError> {
    let condensed = state
        .pipeline
        .condenser
        .condense(
            &req.resume_text,
            &req.question_text,
            req.leadership_principle.as_deref(),
        )
        .await?;

    Ok(Json(CondenseResponse {
        reduction_percent: condensed.reduction_percent(),
        original_words: condensed.original_words,
        condensed_words: condensed.condensed_words,
        truncated: condensed.truncated,
        condensed_resume: condensed.text,
    }))
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub question_text: String,
    pub transcript: String,
    pub condensed_resume: String,
    pub job_description: String,
    pub leadership_principle: String,
}

/// POST /api/v1/responses/evaluate
///
/// Scores one answer. The caller is expected to have condensed the résumé already.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let input = EvaluationInput {
        question_text: &req.question_text,
        transcript: &req.transcript,
        condensed_resume: &req.condensed_resume,
        job_description: &req.job_description,
        leadership_principle: &req.leadership_principle,
    };
    let report = state.pipeline.evaluator.evaluate(&input).await?;
    Ok(Json(report))
}
