use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Complete,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewResponseRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub owner_id: Uuid,
    pub question_number: i32,
    pub question_text: String,
    pub transcript: String,
    pub leadership_principle: String,
    pub overall_score: i32,
    pub overall_feedback: String,
    pub star_analysis: Value,
    pub audio_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}
