//! Document Analyzer: scores the principle catalog against a résumé and job
//! description, and writes the question set for the run.
//!
//! The generator's reply is parsed into a raw shape and then validated into
//! `DocumentAnalysis`. Any deviation from the contract (wrong principle count,
//! unknown titles, out-of-range scores, orphan questions) is a malformed
//! response; nothing is patched up.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::catalog::{catalog_listing, find_principle};
use crate::analysis::models::{DocumentAnalysis, LeadershipPrinciple, Question, StarHints};
use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::fill;
use crate::llm_client::{complete_json, LlmError, TextGenerator};

/// Principles selected per run.
pub const PRINCIPLE_COUNT: usize = 5;
/// Key behaviors listed for every selected principle.
pub const KEY_BEHAVIOR_COUNT: usize = 3;
const MAX_SCORE: u32 = 100;
const ANALYSIS_MAX_TOKENS: u32 = 4096;

// ────────────────────────────────────────────────────────────────────────────
// Raw reply shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    principles: Vec<RawPrinciple>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawPrinciple {
    title: String,
    #[serde(default)]
    description: Option<String>,
    relevance_score: u32,
    key_behaviors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    principle: String,
    question_text: String,
    #[serde(default)]
    context: String,
    star_framework: StarHints,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DocumentAnalyzer {
    llm: Arc<dyn TextGenerator>,
    question_count: usize,
}

impl DocumentAnalyzer {
    pub fn new(llm: Arc<dyn TextGenerator>, question_count: usize) -> Self {
        Self {
            llm,
            question_count,
        }
    }

    /// Produces the ranked principles and question list for one document pair.
    ///
    /// Both documents must be non-empty; that is checked before any call is made.
    /// An empty question list is a valid result; callers substitute the fallback bank.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_description_text: &str,
    ) -> Result<DocumentAnalysis, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation("Resume text cannot be empty".to_string()));
        }
        if job_description_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description text cannot be empty".to_string(),
            ));
        }

        let prompt = fill(
            ANALYSIS_PROMPT_TEMPLATE,
            &[
                ("principle_count", &PRINCIPLE_COUNT.to_string()),
                ("question_count", &self.question_count.to_string()),
                ("catalog", &catalog_listing()),
                ("job_description", job_description_text),
                ("resume", resume_text),
            ],
        );

        let analysis = complete_json::<RawAnalysis>(
            self.llm.as_ref(),
            ANALYSIS_SYSTEM,
            &prompt,
            ANALYSIS_MAX_TOKENS,
        )
        .await
        .and_then(|raw| validate_analysis(raw, self.question_count))
        .map_err(|e| AppError::from_llm("Document analysis", e))?;

        info!(
            "Document analysis complete: top principle '{}' ({}), {} questions",
            analysis.principles[0].title,
            analysis.principles[0].relevance_score,
            analysis.questions.len()
        );

        Ok(analysis)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_analysis(raw: RawAnalysis, question_count: usize) -> Result<DocumentAnalysis, LlmError> {
    if raw.principles.len() != PRINCIPLE_COUNT {
        return Err(LlmError::Schema(format!(
            "expected {PRINCIPLE_COUNT} principles, got {}",
            raw.principles.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut principles = Vec::with_capacity(PRINCIPLE_COUNT);
    for p in raw.principles {
        let def = find_principle(&p.title).ok_or_else(|| {
            LlmError::Schema(format!("principle '{}' is not in the catalog", p.title))
        })?;
        if !seen.insert(def.id) {
            return Err(LlmError::Schema(format!("principle '{}' listed twice", def.title)));
        }
        if p.relevance_score > MAX_SCORE {
            return Err(LlmError::Schema(format!(
                "relevance_score {} for '{}' is outside 0-100",
                p.relevance_score, def.title
            )));
        }
        let key_behaviors: Vec<String> = p
            .key_behaviors
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if key_behaviors.len() != KEY_BEHAVIOR_COUNT {
            return Err(LlmError::Schema(format!(
                "principle '{}' has {} key behaviors, expected {KEY_BEHAVIOR_COUNT}",
                def.title,
                key_behaviors.len()
            )));
        }
        let description = p
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| def.description.to_string());

        principles.push(LeadershipPrinciple {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description,
            relevance_score: p.relevance_score,
            key_behaviors,
        });
    }
    // Stable sort keeps the generator's order among equal scores.
    principles.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

    let mut raw_questions = raw.questions;
    if raw_questions.len() > question_count {
        warn!(
            "Analyzer returned {} questions, keeping the first {}",
            raw_questions.len(),
            question_count
        );
        raw_questions.truncate(question_count);
    }

    let mut questions = Vec::with_capacity(raw_questions.len());
    for (i, q) in raw_questions.into_iter().enumerate() {
        let principle = find_principle(&q.principle)
            .filter(|def| seen.contains(def.id))
            .ok_or_else(|| {
                LlmError::Schema(format!(
                    "question {} targets '{}', which is not a selected principle",
                    i + 1,
                    q.principle
                ))
            })?;
        if q.question_text.trim().is_empty() {
            return Err(LlmError::Schema(format!("question {} has no text", i + 1)));
        }
        questions.push(Question {
            id: format!("q{}", i + 1),
            principle: principle.title.to_string(),
            question_text: q.question_text.trim().to_string(),
            context: q.context.trim().to_string(),
            star_framework: q.star_framework,
        });
    }

    Ok(DocumentAnalysis {
        principles,
        questions,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
