//! In-memory stand-ins for the external collaborators, shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::analysis::DocumentAnalyzer;
use crate::documents::DocumentStore;
use crate::errors::AppError;
use crate::evaluation::{ResponseEvaluator, ResumeCondenser, StarAnalysis};
use crate::interview::recordings::recording_key;
use crate::interview::session_store::NewInterviewResponse;
use crate::interview::{InterviewPipeline, InterviewRegistry, RecordingStore, SessionStore};
use crate::llm_client::{CompletionRequest, LlmError, TextGenerator};
use crate::models::document::{DocumentKind, DocumentRow};
use crate::models::interview::{InterviewResponseRow, SessionStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Text generation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub prompt: String,
    pub json: bool,
    pub max_output_tokens: u32,
}

/// Replays queued replies in order and records every request.
/// Runs dry with an `Api` error so an unexpected extra call fails loudly.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            json: request.json,
            max_output_tokens: request.max_output_tokens,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 500,
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDocumentStore {
    rows: Mutex<Vec<DocumentRow>>,
    fail_puts: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn put_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Makes every later `put` fail with a storage error.
    pub fn fail_puts(&self) {
        self.fail_puts.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(
        &self,
        owner_id: Uuid,
        kind: DocumentKind,
        content: &str,
        filename: &str,
    ) -> Result<Uuid, AppError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AppError::Storage("database: connection refused".to_string()));
        }
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(DocumentRow {
            id,
            owner_id,
            kind: kind.as_str().to_string(),
            content: content.to_string(),
            filename: filename.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn latest(&self, owner_id: Uuid, kind: DocumentKind) -> Result<DocumentRow, AppError> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.owner_id == owner_id && r.kind == kind.as_str())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No {} uploaded yet", kind.as_str())))
    }
}

struct SessionRecord {
    id: Uuid,
    owner_id: Uuid,
    status: SessionStatus,
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<Vec<SessionRecord>>,
    responses: Mutex<Vec<InterviewResponseRow>>,
    created: AtomicUsize,
}

impl InMemorySessionStore {
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self, session_id: Uuid) -> bool {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.id == session_id && s.status == SessionStatus::Complete)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create_in_progress(&self, owner_id: Uuid) -> Result<Uuid, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(existing) = sessions
            .iter()
            .find(|s| s.owner_id == owner_id && s.status == SessionStatus::InProgress)
        {
            return Ok(existing.id);
        }
        let id = Uuid::new_v4();
        sessions.push(SessionRecord {
            id,
            owner_id,
            status: SessionStatus::InProgress,
        });
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn insert_response(&self, response: NewInterviewResponse) -> Result<Uuid, AppError> {
        let mut rows = self.responses.lock().unwrap();
        if rows.iter().any(|r| {
            r.session_id == response.session_id && r.question_number == response.question_number
        }) {
            return Err(AppError::Storage(
                "database: duplicate key value violates unique constraint".to_string(),
            ));
        }
        let id = Uuid::new_v4();
        rows.push(InterviewResponseRow {
            id,
            session_id: response.session_id,
            owner_id: response.owner_id,
            question_number: response.question_number,
            question_text: response.question_text,
            transcript: response.transcript,
            leadership_principle: response.leadership_principle,
            overall_score: response.overall_score,
            overall_feedback: response.overall_feedback,
            star_analysis: serde_json::to_value(&response.star_analysis).unwrap(),
            audio_reference: response.audio_reference,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn mark_complete(&self, session_id: Uuid) -> Result<(), AppError> {
        if let Some(s) = self
            .sessions
            .lock()
            .unwrap()
            .iter_mut()
            .find(|s| s.id == session_id)
        {
            s.status = SessionStatus::Complete;
        }
        Ok(())
    }

    async fn close_in_progress(&self, owner_id: Uuid) -> Result<u64, AppError> {
        let mut closed = 0;
        for s in self.sessions.lock().unwrap().iter_mut() {
            if s.owner_id == owner_id && s.status == SessionStatus::InProgress {
                s.status = SessionStatus::Complete;
                closed += 1;
            }
        }
        Ok(closed)
    }

    async fn list_responses(&self, session_id: Uuid) -> Result<Vec<InterviewResponseRow>, AppError> {
        if !self.sessions.lock().unwrap().iter().any(|s| s.id == session_id) {
            return Err(AppError::NotFound(format!("Interview session {session_id}")));
        }
        let mut rows: Vec<_> = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.question_number);
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryRecordingStore {
    objects: Mutex<Vec<(String, Bytes)>>,
}

#[async_trait]
impl RecordingStore for InMemoryRecordingStore {
    async fn put(&self, owner_id: Uuid, audio: Bytes, _content_type: &str) -> Result<String, AppError> {
        let key = recording_key(owner_id, Uuid::new_v4());
        self.objects.lock().unwrap().push((key.clone(), audio));
        Ok(key)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wiring
// ────────────────────────────────────────────────────────────────────────────

pub fn pipeline_with(
    llm: Arc<ScriptedGenerator>,
    documents: Arc<InMemoryDocumentStore>,
    sessions: Arc<InMemorySessionStore>,
) -> InterviewPipeline {
    InterviewPipeline {
        documents,
        sessions,
        analyzer: DocumentAnalyzer::new(llm.clone(), 5),
        condenser: ResumeCondenser::new(llm.clone(), 3000),
        evaluator: ResponseEvaluator::new(llm),
    }
}

/// App state over in-memory backends for the nil owner.
pub fn test_state(replies: Vec<Result<String, LlmError>>) -> (AppState, Arc<ScriptedGenerator>) {
    let llm = Arc::new(ScriptedGenerator::new(replies));
    let pipeline = pipeline_with(
        llm.clone(),
        Arc::new(InMemoryDocumentStore::default()),
        Arc::new(InMemorySessionStore::default()),
    );
    let state = AppState {
        owner_id: Uuid::nil(),
        pipeline,
        recordings: Arc::new(InMemoryRecordingStore::default()),
        interviews: Arc::new(InterviewRegistry::default()),
        max_recording_bytes: 25 * 1024 * 1024,
    };
    (state, llm)
}

// ────────────────────────────────────────────────────────────────────────────
// Fixtures
// ────────────────────────────────────────────────────────────────────────────

fn analysis_principles() -> Value {
    json!([
        {
            "title": "Customer Obsession",
            "description": "Leaders start with the customer and work backwards.",
            "relevance_score": 95,
            "key_behaviors": ["Customer-first thinking", "Data-driven decisions", "Long-term relationship building"]
        },
        {
            "title": "Ownership",
            "description": "Leaders act on behalf of the entire company.",
            "relevance_score": 88,
            "key_behaviors": ["Long-term thinking", "Accountability", "Initiative"]
        },
        {
            "title": "Deliver Results",
            "description": "Leaders focus on the key inputs and deliver them with quality.",
            "relevance_score": 85,
            "key_behaviors": ["Bias for outcomes", "Persistence", "Prioritization"]
        },
        {
            "title": "Dive Deep",
            "description": "Leaders operate at all levels and stay connected to the details.",
            "relevance_score": 72,
            "key_behaviors": ["Metrics fluency", "Root-cause analysis", "Skepticism"]
        },
        {
            "title": "Earn Trust",
            "description": "Leaders listen attentively and speak candidly.",
            "relevance_score": 60,
            "key_behaviors": ["Candor", "Self-critique", "Respect"]
        }
    ])
}

fn analysis_question(principle: &str, text: &str) -> Value {
    json!({
        "principle": principle,
        "question_text": text,
        "context": "Draw on your most recent role.",
        "star_framework": {
            "situation": "Describe the context",
            "task": "What was your responsibility?",
            "action": "What steps did you take?",
            "result": "What was the measurable impact?"
        }
    })
}

/// A valid analyzer reply: five principles led by Customer Obsession (95) and five questions.
pub fn analysis_json() -> String {
    json!({
        "principles": analysis_principles(),
        "questions": [
            analysis_question("Customer Obsession", "Tell me about a time you put a customer's needs ahead of a deadline."),
            analysis_question("Ownership", "Tell me about a time you took on a problem outside your role."),
            analysis_question("Deliver Results", "Tell me about a launch you delivered under pressure."),
            analysis_question("Dive Deep", "Tell me about a time the data contradicted the anecdote."),
            analysis_question("Earn Trust", "Tell me about a time you admitted a mistake to your team.")
        ]
    })
    .to_string()
}

/// Same principles, no questions.
pub fn analysis_json_without_questions() -> String {
    json!({ "principles": analysis_principles(), "questions": [] }).to_string()
}

/// A valid evaluator reply with every score set to `score`.
pub fn score_report_value(score: u32) -> Value {
    json!({
        "overall": {"score": score, "feedback": "Clear story with a measurable result."},
        "star": {
            "situation": {"score": score, "feedback": "Context was clear."},
            "task": {"score": score, "feedback": "Ownership could be sharper."},
            "action": {"score": score, "feedback": "Specific steps were described."},
            "result": {"score": score, "feedback": "Quantify the churn reduction."}
        },
        "suggested_answer": {
            "situation": "At Acme I was the senior PM for a B2B analytics product when our largest customer warned they would churn within the quarter.",
            "task": "I owned the renewal outcome and had to find out why the dashboards were failing them before their contract review in six weeks.",
            "action": "I ran five interviews with their analysts, traced the slow reports to one query path, and reprioritised two sprints to rebuild it.",
            "result": "Report load time dropped by seventy percent, the customer renewed for three years, and revenue from the account grew forty percent."
        },
        "job_alignment": [
            "Shows working backwards from a customer problem",
            "Demonstrates data-driven prioritisation",
            "Connects product decisions to revenue outcomes"
        ]
    })
}

pub fn score_report_json(score: u32) -> String {
    score_report_value(score).to_string()
}

pub fn sample_star_analysis(score: u32) -> StarAnalysis {
    serde_json::from_value(score_report_value(score)["star"].clone()).unwrap()
}
