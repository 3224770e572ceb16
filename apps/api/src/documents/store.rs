//! Document Store: persists uploaded résumé and job-description text.
//!
//! Re-upload is an additional INSERT; readers always take the most recently
//! created row of a kind for an owner. No update or delete is exposed.

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::documents::sanitize::{sanitize_text, word_count};
use crate::errors::AppError;
use crate::models::document::{DocumentKind, DocumentRow};

/// A document as received from the upload transport: already text, not yet sanitized.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: String,
}

/// Carried in `AppState` as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Durably writes one document and returns its id. `content` is stored as given.
    async fn put(
        &self,
        owner_id: Uuid,
        kind: DocumentKind,
        content: &str,
        filename: &str,
    ) -> Result<Uuid, AppError>;

    /// Returns the most recently created document of `kind`, or `NotFound`.
    async fn latest(&self, owner_id: Uuid, kind: DocumentKind) -> Result<DocumentRow, AppError>;
}

/// Sanitizes, validates and stores one uploaded document.
///
/// Empty content (after sanitization) is a validation error and nothing is written.
pub async fn store_document(
    store: &dyn DocumentStore,
    owner_id: Uuid,
    kind: DocumentKind,
    upload: &UploadedDocument,
) -> Result<Uuid, AppError> {
    let content = sanitize_text(&upload.content);
    if content.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{} content cannot be empty",
            kind.label()
        )));
    }

    let filename = if upload.filename.trim().is_empty() {
        format!("{}.txt", kind.as_str())
    } else {
        upload.filename.trim().to_string()
    };

    let id = store.put(owner_id, kind, &content, &filename).await?;
    info!(
        "Stored {} '{}' ({} words) for owner {}",
        kind.as_str(),
        filename,
        word_count(&content),
        owner_id
    );
    Ok(id)
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn put(
        &self,
        owner_id: Uuid,
        kind: DocumentKind,
        content: &str,
        filename: &str,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO documents (id, owner_id, kind, content, filename)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(kind.as_str())
        .bind(content)
        .bind(filename)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn latest(&self, owner_id: Uuid, kind: DocumentKind) -> Result<DocumentRow, AppError> {
        sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT * FROM documents
            WHERE owner_id = $1 AND kind = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No {} uploaded yet", kind.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryDocumentStore;

    fn upload(content: &str) -> UploadedDocument {
        UploadedDocument {
            filename: "resume.txt".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_document_sanitizes_before_put() {
        let store = InMemoryDocumentStore::default();
        let owner = Uuid::nil();
        store_document(&store, owner, DocumentKind::Resume, &upload("Senior\0 PM"))
            .await
            .unwrap();
        let latest = store.latest(owner, DocumentKind::Resume).await.unwrap();
        assert_eq!(latest.content, "Senior PM");
    }

    #[tokio::test]
    async fn test_store_document_rejects_control_only_content() {
        let store = InMemoryDocumentStore::default();
        let result =
            store_document(&store, Uuid::nil(), DocumentKind::Resume, &upload("\0\u{1}  ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn test_latest_returns_most_recent_upload() {
        let store = InMemoryDocumentStore::default();
        let owner = Uuid::nil();
        store_document(&store, owner, DocumentKind::Resume, &upload("first version"))
            .await
            .unwrap();
        store_document(&store, owner, DocumentKind::Resume, &upload("second version"))
            .await
            .unwrap();
        let latest = store.latest(owner, DocumentKind::Resume).await.unwrap();
        assert_eq!(latest.content, "second version");
    }

    #[tokio::test]
    async fn test_latest_is_scoped_by_kind_and_owner() {
        let store = InMemoryDocumentStore::default();
        let owner = Uuid::nil();
        store_document(&store, owner, DocumentKind::Resume, &upload("resume text"))
            .await
            .unwrap();

        let jd = store.latest(owner, DocumentKind::JobDescription).await;
        assert!(matches!(jd, Err(AppError::NotFound(_))));

        let other = store.latest(Uuid::new_v4(), DocumentKind::Resume).await;
        assert!(matches!(other, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_blank_filename_gets_default() {
        let store = InMemoryDocumentStore::default();
        let doc = UploadedDocument {
            filename: "  ".to_string(),
            content: "Seeking PM".to_string(),
        };
        store_document(&store, Uuid::nil(), DocumentKind::JobDescription, &doc)
            .await
            .unwrap();
        let latest = store
            .latest(Uuid::nil(), DocumentKind::JobDescription)
            .await
            .unwrap();
        assert_eq!(latest.filename, "job_description.txt");
    }
}
