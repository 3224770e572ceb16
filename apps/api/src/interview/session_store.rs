//! Session store: interview sessions and their per-question responses.
//!
//! At most one `in_progress` session exists per owner. Creation is an
//! upsert-if-absent backed by the partial unique index
//! `interview_sessions_one_in_progress_idx`, so retries and concurrent callers
//! converge on the same row.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::StarAnalysis;
use crate::models::interview::{InterviewResponseRow, SessionStatus};

/// One answered question, ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewInterviewResponse {
    pub session_id: Uuid,
    pub owner_id: Uuid,
    pub question_number: i32,
    pub question_text: String,
    pub transcript: String,
    pub leadership_principle: String,
    pub overall_score: i32,
    pub overall_feedback: String,
    pub star_analysis: StarAnalysis,
    pub audio_reference: Option<String>,
}

/// Carried in `InterviewPipeline` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the owner's in-progress session id, creating it if absent.
    async fn get_or_create_in_progress(&self, owner_id: Uuid) -> Result<Uuid, AppError>;

    async fn insert_response(&self, response: NewInterviewResponse) -> Result<Uuid, AppError>;

    /// Sets the session to `complete`. Completing twice is a no-op.
    async fn mark_complete(&self, session_id: Uuid) -> Result<(), AppError>;

    /// Completes whatever session the owner still has in progress, including
    /// one left behind by a previous process. Returns the number closed.
    async fn close_in_progress(&self, owner_id: Uuid) -> Result<u64, AppError>;

    /// Responses ordered by question number. `NotFound` if the session does not exist.
    async fn list_responses(&self, session_id: Uuid) -> Result<Vec<InterviewResponseRow>, AppError>;
}

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get_or_create_in_progress(&self, owner_id: Uuid) -> Result<Uuid, AppError> {
        let created = sqlx::query(
            r#"
            INSERT INTO interview_sessions (id, owner_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id) WHERE status = 'in_progress' DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(SessionStatus::InProgress.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        let id: Uuid = sqlx::query_scalar(
            "SELECT id FROM interview_sessions WHERE owner_id = $1 AND status = $2",
        )
        .bind(owner_id)
        .bind(SessionStatus::InProgress.as_str())
        .fetch_one(&self.pool)
        .await?;

        if created > 0 {
            info!("Created interview session {id} for owner {owner_id}");
        }
        Ok(id)
    }

    async fn insert_response(&self, response: NewInterviewResponse) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let star = serde_json::to_value(&response.star_analysis)
            .map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO interview_responses
                (id, session_id, owner_id, question_number, question_text, transcript,
                 leadership_principle, overall_score, overall_feedback, star_analysis,
                 audio_reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id)
        .bind(response.session_id)
        .bind(response.owner_id)
        .bind(response.question_number)
        .bind(&response.question_text)
        .bind(&response.transcript)
        .bind(&response.leadership_principle)
        .bind(response.overall_score)
        .bind(&response.overall_feedback)
        .bind(star)
        .bind(&response.audio_reference)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn mark_complete(&self, session_id: Uuid) -> Result<(), AppError> {
        let updated = sqlx::query(
            r#"
            UPDATE interview_sessions
            SET status = $2, completed_at = NOW()
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(session_id)
        .bind(SessionStatus::Complete.as_str())
        .bind(SessionStatus::InProgress.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated > 0 {
            info!("Marked interview session {session_id} complete");
        }
        Ok(())
    }

    async fn close_in_progress(&self, owner_id: Uuid) -> Result<u64, AppError> {
        let closed = sqlx::query(
            r#"
            UPDATE interview_sessions
            SET status = $2, completed_at = NOW()
            WHERE owner_id = $1 AND status = $3
            "#,
        )
        .bind(owner_id)
        .bind(SessionStatus::Complete.as_str())
        .bind(SessionStatus::InProgress.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if closed > 0 {
            info!("Closed {closed} in-progress interview session(s) for owner {owner_id}");
        }
        Ok(closed)
    }

    async fn list_responses(&self, session_id: Uuid) -> Result<Vec<InterviewResponseRow>, AppError> {
        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM interview_sessions WHERE id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!("Interview session {session_id}")));
        }

        let rows = sqlx::query_as::<_, InterviewResponseRow>(
            r#"
            SELECT * FROM interview_responses
            WHERE session_id = $1
            ORDER BY question_number
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
