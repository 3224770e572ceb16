//! Interview Session Controller: the wizard that sequences one interview run.
//!
//! ```text
//! Landing → Uploading → PrincipleSelection → Question(0) → Feedback(0)
//!        → Question(1) → … → Feedback(N-1) → Final
//! ```
//!
//! Every operation checks the current step first and answers
//! `InvalidTransition` if it does not apply. A failed stage never changes the
//! step: the error is kept in `last_error` and the user's input (uploaded
//! documents, transcript draft) stays in place for a retry.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::fallback::fallback_questions;
use crate::analysis::{LeadershipPrinciple, Question};
use crate::documents::sanitize::sanitize_text;
use crate::documents::{store_document, UploadedDocument};
use crate::errors::{AppError, ErrorReport};
use crate::evaluation::evaluator::StarComponent;
use crate::evaluation::{EvaluationInput, ScoreReport};
use crate::interview::pipeline::InterviewPipeline;
use crate::interview::session_store::NewInterviewResponse;
use crate::models::document::DocumentKind;

/// Questions kept when the user narrows the run to one principle.
pub const FILTERED_QUESTION_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "index", rename_all = "snake_case")]
pub enum Step {
    Landing,
    Uploading,
    PrincipleSelection,
    Question(usize),
    Feedback(usize),
    Final,
}

/// One answered question: what was asked, what was said, how it scored.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    /// 1-based, matches `interview_responses.question_number`.
    pub question_number: u32,
    pub question: Question,
    pub transcript: String,
    pub audio_reference: Option<String>,
    pub report: ScoreReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            PerformanceBand::Excellent
        } else if score >= 60 {
            PerformanceBand::Good
        } else {
            PerformanceBand::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub question_number: u32,
    pub principle: String,
    pub question_text: String,
    pub score: u32,
    /// Weakest STAR component of the answer.
    pub key_improvement: StarComponent,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalSummary {
    pub lines: Vec<SummaryLine>,
    pub aggregate_score: Option<u32>,
    pub band: Option<PerformanceBand>,
}

/// What the client renders. Read-only copy of the controller.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    #[serde(flatten)]
    pub step: Step,
    pub principles: Vec<LeadershipPrinciple>,
    pub questions: Vec<Question>,
    pub used_fallback_questions: bool,
    pub principle_filter: Option<String>,
    pub current_question: Option<Question>,
    pub transcript_draft: String,
    pub results: Vec<QuestionResult>,
    pub session_id: Option<Uuid>,
    pub last_error: Option<ErrorReport>,
    pub summary: Option<FinalSummary>,
}

/// Session-level score: mean of the overall scores, rounded half away from zero.
pub fn aggregate_score(scores: &[u32]) -> Option<u32> {
    if scores.is_empty() {
        return None;
    }
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let mean = total as f64 / scores.len() as f64;
    Some(mean.round() as u32)
}

#[derive(Debug)]
pub struct InterviewController {
    owner_id: Uuid,
    step: Step,
    principles: Vec<LeadershipPrinciple>,
    /// Full question set from analysis; `questions` is the (possibly filtered) run.
    all_questions: Vec<Question>,
    questions: Vec<Question>,
    used_fallback_questions: bool,
    principle_filter: Option<String>,
    results: Vec<QuestionResult>,
    session_id: Option<Uuid>,
    transcript_draft: String,
    last_error: Option<ErrorReport>,
}

impl InterviewController {
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            step: Step::Landing,
            principles: Vec::new(),
            all_questions: Vec::new(),
            questions: Vec::new(),
            used_fallback_questions: false,
            principle_filter: None,
            results: Vec::new(),
            session_id: None,
            transcript_draft: String::new(),
            last_error: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    pub fn last_error(&self) -> Option<&ErrorReport> {
        self.last_error.as_ref()
    }

    pub fn final_score(&self) -> Option<u32> {
        let scores: Vec<u32> = self.results.iter().map(|r| r.report.overall.score).collect();
        aggregate_score(&scores)
    }

    /// Landing → Uploading.
    pub fn begin_upload(&mut self) -> Result<(), AppError> {
        match self.step {
            Step::Landing => {
                self.transition(Step::Uploading);
                Ok(())
            }
            Step::Uploading => Ok(()),
            other => Err(invalid("start uploading", other)),
        }
    }

    /// Uploading → PrincipleSelection. Stores both documents, then analyzes them.
    pub async fn upload_and_analyze(
        &mut self,
        pipeline: &InterviewPipeline,
        resume: &UploadedDocument,
        job_description: &UploadedDocument,
    ) -> Result<(), AppError> {
        if self.step != Step::Uploading {
            return Err(invalid("upload documents", self.step));
        }

        match self.run_upload(pipeline, resume, job_description).await {
            Ok((principles, questions, used_fallback)) => {
                self.principles = principles;
                self.all_questions = questions;
                self.questions = self.all_questions.clone();
                self.used_fallback_questions = used_fallback;
                self.last_error = None;
                self.transition(Step::PrincipleSelection);
                Ok(())
            }
            Err(e) => Err(self.fail("Document upload", e)),
        }
    }

    async fn run_upload(
        &self,
        pipeline: &InterviewPipeline,
        resume: &UploadedDocument,
        job_description: &UploadedDocument,
    ) -> Result<(Vec<LeadershipPrinciple>, Vec<Question>, bool), AppError> {
        // Both documents must be usable before either is written.
        let resume_text = sanitize_text(&resume.content);
        let jd_text = sanitize_text(&job_description.content);
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation("Resume content cannot be empty".to_string()));
        }
        if jd_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description content cannot be empty".to_string(),
            ));
        }

        // A run starts with no open session; one left by an earlier process
        // would collide with this run's question numbers.
        pipeline.sessions.close_in_progress(self.owner_id).await?;

        let documents = pipeline.documents.as_ref();
        store_document(documents, self.owner_id, DocumentKind::Resume, resume).await?;
        store_document(documents, self.owner_id, DocumentKind::JobDescription, job_description)
            .await?;

        let analysis = pipeline.analyzer.analyze(&resume_text, &jd_text).await?;

        if analysis.questions.is_empty() {
            warn!("Analyzer produced no questions, using the fallback bank");
            let questions = fallback_questions(&analysis.principles);
            Ok((analysis.principles, questions, true))
        } else {
            Ok((analysis.principles, analysis.questions, false))
        }
    }

    /// PrincipleSelection → Question(0).
    ///
    /// With a filter, the run is at most three questions for that principle,
    /// or the first three of the full set if none match.
    pub fn select_principle(&mut self, principle: Option<&str>) -> Result<(), AppError> {
        if self.step != Step::PrincipleSelection {
            return Err(invalid("select a principle", self.step));
        }

        let filter = principle.map(str::trim).filter(|p| !p.is_empty());
        let questions: Vec<Question> = match filter {
            None => self.all_questions.clone(),
            Some(name) => {
                let matching: Vec<Question> = self
                    .all_questions
                    .iter()
                    .filter(|q| q.principle.eq_ignore_ascii_case(name))
                    .take(FILTERED_QUESTION_LIMIT)
                    .cloned()
                    .collect();
                if matching.is_empty() {
                    info!("No questions match '{name}', using the first {FILTERED_QUESTION_LIMIT}");
                    self.all_questions
                        .iter()
                        .take(FILTERED_QUESTION_LIMIT)
                        .cloned()
                        .collect()
                } else {
                    matching
                }
            }
        };

        if questions.is_empty() {
            return Err(AppError::InvalidTransition(
                "There are no questions to ask".to_string(),
            ));
        }

        self.questions = questions;
        self.principle_filter = filter.map(str::to_string);
        self.transcript_draft.clear();
        self.last_error = None;
        self.transition(Step::Question(0));
        Ok(())
    }

    /// Question(i) → Feedback(i). Condenses the résumé, scores the answer and
    /// persists the response, in that order.
    pub async fn request_feedback(
        &mut self,
        pipeline: &InterviewPipeline,
        transcript: &str,
        audio_reference: Option<String>,
    ) -> Result<(), AppError> {
        let Step::Question(index) = self.step else {
            return Err(invalid("request feedback", self.step));
        };

        let transcript = sanitize_text(transcript);
        self.transcript_draft = transcript.clone();
        if transcript.trim().is_empty() {
            return Err(self.fail(
                "Feedback",
                AppError::Validation("Transcript cannot be empty".to_string()),
            ));
        }

        match self.run_feedback(pipeline, index, &transcript, audio_reference).await {
            Ok((session_id, result)) => {
                self.session_id = Some(session_id);
                self.results.push(result);
                self.transcript_draft.clear();
                self.last_error = None;
                self.transition(Step::Feedback(index));
                Ok(())
            }
            Err(e) => Err(self.fail("Feedback", e)),
        }
    }

    async fn run_feedback(
        &self,
        pipeline: &InterviewPipeline,
        index: usize,
        transcript: &str,
        audio_reference: Option<String>,
    ) -> Result<(Uuid, QuestionResult), AppError> {
        let question = self.questions.get(index).cloned().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("question index {index} out of range"))
        })?;

        let resume = pipeline
            .documents
            .latest(self.owner_id, DocumentKind::Resume)
            .await?;
        let job_description = pipeline
            .documents
            .latest(self.owner_id, DocumentKind::JobDescription)
            .await?;

        let condensed = pipeline
            .condenser
            .condense(&resume.content, &question.question_text, Some(&question.principle))
            .await?;

        let report = pipeline
            .evaluator
            .evaluate(&EvaluationInput {
                question_text: &question.question_text,
                transcript,
                condensed_resume: &condensed.text,
                job_description: &job_description.content,
                leadership_principle: &question.principle,
            })
            .await?;

        let session_id = match self.session_id {
            Some(id) => id,
            None => pipeline.sessions.get_or_create_in_progress(self.owner_id).await?,
        };

        let question_number = index as u32 + 1;
        pipeline
            .sessions
            .insert_response(NewInterviewResponse {
                session_id,
                owner_id: self.owner_id,
                question_number: question_number as i32,
                question_text: question.question_text.clone(),
                transcript: transcript.to_string(),
                leadership_principle: question.principle.clone(),
                overall_score: report.overall.score as i32,
                overall_feedback: report.overall.feedback.clone(),
                star_analysis: report.star.clone(),
                audio_reference: audio_reference.clone(),
            })
            .await?;

        Ok((
            session_id,
            QuestionResult {
                question_number,
                question,
                transcript: transcript.to_string(),
                audio_reference,
                report,
            },
        ))
    }

    /// Feedback(i) → Question(i+1), or Final after the last question.
    pub async fn advance(&mut self, pipeline: &InterviewPipeline) -> Result<(), AppError> {
        let Step::Feedback(index) = self.step else {
            return Err(invalid("advance", self.step));
        };

        if index + 1 < self.questions.len() {
            self.transition(Step::Question(index + 1));
            return Ok(());
        }

        if let Some(session_id) = self.session_id {
            if let Err(e) = pipeline.sessions.mark_complete(session_id).await {
                return Err(self.fail("Finishing session", e));
            }
        }
        self.last_error = None;
        self.transition(Step::Final);
        info!(
            "Interview for owner {} finished: {} answers, aggregate {:?}",
            self.owner_id,
            self.results.len(),
            self.final_score()
        );
        Ok(())
    }

    /// Any step → Landing. Clears the run; any unfinished session of the
    /// owner is closed first, whether or not this controller opened it.
    pub async fn start_new_session(&mut self, pipeline: &InterviewPipeline) -> Result<(), AppError> {
        if let Err(e) = pipeline.sessions.close_in_progress(self.owner_id).await {
            return Err(self.fail("Closing session", e));
        }
        *self = InterviewController::new(self.owner_id);
        info!("Interview for owner {} reset", self.owner_id);
        Ok(())
    }

    pub fn summary(&self) -> Option<FinalSummary> {
        if self.step != Step::Final {
            return None;
        }
        let lines = self
            .results
            .iter()
            .map(|r| SummaryLine {
                question_number: r.question_number,
                principle: r.question.principle.clone(),
                question_text: r.question.question_text.clone(),
                score: r.report.overall.score,
                key_improvement: r.report.star.weakest(),
            })
            .collect();
        let aggregate_score = self.final_score();
        Some(FinalSummary {
            lines,
            aggregate_score,
            band: aggregate_score.map(PerformanceBand::for_score),
        })
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let current_question = match self.step {
            Step::Question(i) | Step::Feedback(i) => self.questions.get(i).cloned(),
            _ => None,
        };
        ControllerSnapshot {
            step: self.step,
            principles: self.principles.clone(),
            questions: self.questions.clone(),
            used_fallback_questions: self.used_fallback_questions,
            principle_filter: self.principle_filter.clone(),
            current_question,
            transcript_draft: self.transcript_draft.clone(),
            results: self.results.clone(),
            session_id: self.session_id,
            last_error: self.last_error.clone(),
            summary: self.summary(),
        }
    }

    fn transition(&mut self, to: Step) {
        info!("Interview {}: {:?} -> {:?}", self.owner_id, self.step, to);
        self.step = to;
    }

    fn fail(&mut self, stage: &str, error: AppError) -> AppError {
        warn!("{stage} failed at {:?}: {error}", self.step);
        self.last_error = Some(error.report());
        error
    }
}

fn invalid(action: &str, step: Step) -> AppError {
    AppError::InvalidTransition(format!("Cannot {action} while at {step:?}"))
}
