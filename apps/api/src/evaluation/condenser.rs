//! Resume Condenser: relevance-biased, size-bounded extract of a résumé for
//! one interview question.
//!
//! The word cap is stated in the prompt, but the generator may overshoot it;
//! output is hard-truncated on a word boundary before it is returned.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::documents::sanitize::word_count;
use crate::errors::AppError;
use crate::evaluation::prompts::{CONDENSE_PROMPT_TEMPLATE, CONDENSE_SYSTEM};
use crate::llm_client::prompts::{fill, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{CompletionRequest, LlmError, TextGenerator};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CondensedResume {
    pub text: String,
    pub original_words: usize,
    pub condensed_words: usize,
    /// True when the generator overshot the cap and the tail was cut.
    pub truncated: bool,
}

impl CondensedResume {
    /// Percentage of words removed, 0 – 100.
    pub fn reduction_percent(&self) -> u32 {
        if self.original_words == 0 || self.condensed_words >= self.original_words {
            return 0;
        }
        let kept = self.condensed_words as f64 / self.original_words as f64;
        ((1.0 - kept) * 100.0).round() as u32
    }
}

#[derive(Clone)]
pub struct ResumeCondenser {
    llm: Arc<dyn TextGenerator>,
    word_cap: usize,
}

impl ResumeCondenser {
    pub fn new(llm: Arc<dyn TextGenerator>, word_cap: usize) -> Self {
        Self { llm, word_cap }
    }

    pub fn word_cap(&self) -> usize {
        self.word_cap
    }

    /// Condenses `resume` against `question_text` (and the principle, when known).
    ///
    /// Fails as a unit: a transport error or an empty reply is returned to the
    /// caller. There is no fallback to the full résumé.
    pub async fn condense(
        &self,
        resume: &str,
        question_text: &str,
        leadership_principle: Option<&str>,
    ) -> Result<CondensedResume, AppError> {
        if resume.trim().is_empty() {
            return Err(AppError::Validation("Resume text cannot be empty".to_string()));
        }
        if question_text.trim().is_empty() {
            return Err(AppError::Validation("Question text cannot be empty".to_string()));
        }

        let principle = leadership_principle
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("Not specified");

        let prompt = fill(
            CONDENSE_PROMPT_TEMPLATE,
            &[
                ("question_text", question_text),
                ("leadership_principle", principle),
                ("word_cap", &self.word_cap.to_string()),
                ("no_fabrication", NO_FABRICATION_INSTRUCTION),
                ("resume", resume),
            ],
        );

        let reply = self
            .llm
            .complete(CompletionRequest {
                system: CONDENSE_SYSTEM,
                prompt: &prompt,
                json: false,
                max_output_tokens: max_tokens_for(self.word_cap),
            })
            .await
            .map_err(|e| AppError::from_llm("Resume condensation", e))?;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(AppError::from_llm(
                "Resume condensation",
                LlmError::EmptyContent,
            ));
        }

        let (text, truncated) = match truncate_words(reply, self.word_cap) {
            Some(cut) => {
                warn!(
                    "Condensed resume exceeded {} words ({}), truncating",
                    self.word_cap,
                    word_count(reply)
                );
                (cut.to_string(), true)
            }
            None => (reply.to_string(), false),
        };
        if text.is_empty() {
            return Err(AppError::from_llm(
                "Resume condensation",
                LlmError::EmptyContent,
            ));
        }

        let condensed = CondensedResume {
            original_words: word_count(resume),
            condensed_words: word_count(&text),
            text,
            truncated,
        };

        info!(
            "Condensed resume {} -> {} words ({}% reduction)",
            condensed.original_words,
            condensed.condensed_words,
            condensed.reduction_percent()
        );

        Ok(condensed)
    }
}

/// Output token budget for a word cap: roughly 4 tokens per 3 words, plus headroom.
fn max_tokens_for(word_cap: usize) -> u32 {
    let tokens = word_cap.saturating_mul(4) / 3 + 256;
    u32::try_from(tokens).unwrap_or(u32::MAX)
}

/// Returns `text` cut after its `cap`-th word, or `None` if it already fits.
pub fn truncate_words(text: &str, cap: usize) -> Option<&str> {
    let mut words = 0;
    let mut in_word = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            in_word = true;
            words += 1;
            if words > cap {
                return Some(text[..i].trim_end());
            }
        }
    }
    None
}
