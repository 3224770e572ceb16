//! Response Evaluator: scores one transcribed answer with the STAR rubric.
//!
//! The reply must match `ScoreReport` exactly and pass `validate_report`.
//! A reply that fails either check is a hard failure for the call; it is not
//! repaired and not retried here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};
use crate::llm_client::prompts::{fill, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{complete_json, LlmError, TextGenerator};

const MAX_SCORE: u32 = 100;
const EVALUATION_MAX_TOKENS: u32 = 3000;
/// Suggested-answer paragraphs shorter than this are rejected as trivial.
pub const MIN_SUGGESTED_ANSWER_WORDS: usize = 12;
const MIN_JOB_ALIGNMENT: usize = 3;
const MAX_JOB_ALIGNMENT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFeedback {
    pub score: u32,
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarComponent {
    Situation,
    Task,
    Action,
    Result,
}

impl StarComponent {
    pub const ALL: [StarComponent; 4] = [
        StarComponent::Situation,
        StarComponent::Task,
        StarComponent::Action,
        StarComponent::Result,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StarComponent::Situation => "situation",
            StarComponent::Task => "task",
            StarComponent::Action => "action",
            StarComponent::Result => "result",
        }
    }
}

/// Per-component rubric scores. Persisted as JSONB on each response row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarAnalysis {
    pub situation: ScoredFeedback,
    pub task: ScoredFeedback,
    pub action: ScoredFeedback,
    pub result: ScoredFeedback,
}

impl StarAnalysis {
    pub fn get(&self, component: StarComponent) -> &ScoredFeedback {
        match component {
            StarComponent::Situation => &self.situation,
            StarComponent::Task => &self.task,
            StarComponent::Action => &self.action,
            StarComponent::Result => &self.result,
        }
    }

    /// Lowest-scoring component; the first one wins ties.
    pub fn weakest(&self) -> StarComponent {
        StarComponent::ALL
            .into_iter()
            .min_by_key(|c| self.get(*c).score)
            .unwrap_or(StarComponent::Situation)
    }
}

/// Model answer restructured into STAR, one paragraph per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAnswer {
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
}

impl SuggestedAnswer {
    pub fn get(&self, component: StarComponent) -> &str {
        match component {
            StarComponent::Situation => &self.situation,
            StarComponent::Task => &self.task,
            StarComponent::Action => &self.action,
            StarComponent::Result => &self.result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall: ScoredFeedback,
    pub star: StarAnalysis,
    pub suggested_answer: SuggestedAnswer,
    pub job_alignment: Vec<String>,
}

/// Everything the evaluation prompt needs. All fields are required.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    pub question_text: &'a str,
    pub transcript: &'a str,
    pub condensed_resume: &'a str,
    pub job_description: &'a str,
    pub leadership_principle: &'a str,
}

impl EvaluationInput<'_> {
    fn check(&self) -> Result<(), AppError> {
        let fields = [
            ("question_text", self.question_text),
            ("transcript", self.transcript),
            ("condensed_resume", self.condensed_resume),
            ("job_description", self.job_description),
            ("leadership_principle", self.leadership_principle),
        ];
        let missing: Vec<_> = fields
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required evaluation input: {}",
                missing.join(", ")
            )))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ResponseEvaluator {
    llm: Arc<dyn TextGenerator>,
}

impl ResponseEvaluator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    pub async fn evaluate(&self, input: &EvaluationInput<'_>) -> Result<ScoreReport, AppError> {
        input.check()?;

        let prompt = fill(
            EVALUATION_PROMPT_TEMPLATE,
            &[
                ("question_text", input.question_text),
                ("leadership_principle", input.leadership_principle),
                ("transcript", input.transcript),
                ("resume", input.condensed_resume),
                ("job_description", input.job_description),
                ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ],
        );

        let report = complete_json::<ScoreReport>(
            self.llm.as_ref(),
            EVALUATION_SYSTEM,
            &prompt,
            EVALUATION_MAX_TOKENS,
        )
        .await
        .and_then(validate_report)
        .map_err(|e| AppError::from_llm("Response evaluation", e))?;

        info!(
            "Evaluated answer for '{}': overall {}/100 (S{} T{} A{} R{})",
            input.leadership_principle,
            report.overall.score,
            report.star.situation.score,
            report.star.task.score,
            report.star.action.score,
            report.star.result.score
        );

        Ok(report)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_report(report: ScoreReport) -> Result<ScoreReport, LlmError> {
    check_scored("overall", &report.overall)?;
    for component in StarComponent::ALL {
        check_scored(component.as_str(), report.star.get(component))?;
    }

    for component in StarComponent::ALL {
        let paragraph = report.suggested_answer.get(component);
        let words = paragraph.split_whitespace().count();
        if words < MIN_SUGGESTED_ANSWER_WORDS {
            return Err(LlmError::Schema(format!(
                "suggested_answer.{} is too short ({} words, need {})",
                component.as_str(),
                words,
                MIN_SUGGESTED_ANSWER_WORDS
            )));
        }
    }

    let bullets = report.job_alignment.len();
    if !(MIN_JOB_ALIGNMENT..=MAX_JOB_ALIGNMENT).contains(&bullets) {
        return Err(LlmError::Schema(format!(
            "job_alignment has {bullets} bullets, need {MIN_JOB_ALIGNMENT}-{MAX_JOB_ALIGNMENT}"
        )));
    }
    if report.job_alignment.iter().any(|b| b.trim().is_empty()) {
        return Err(LlmError::Schema("job_alignment contains an empty bullet".to_string()));
    }

    Ok(report)
}

fn check_scored(name: &str, scored: &ScoredFeedback) -> Result<(), LlmError> {
    if scored.score > MAX_SCORE {
        return Err(LlmError::Schema(format!(
            "{name}.score {} is outside 0-100",
            scored.score
        )));
    }
    if scored.feedback.trim().is_empty() {
        return Err(LlmError::Schema(format!("{name}.feedback is empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
