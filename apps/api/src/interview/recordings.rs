//! Audio recordings: raw answer audio kept in object storage.
//!
//! The pipeline never reads audio back; it only carries the returned key as
//! the response's `audio_reference`. Transcription happens elsewhere.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Stores one recording and returns its opaque reference.
    async fn put(&self, owner_id: Uuid, audio: Bytes, content_type: &str) -> Result<String, AppError>;
}

pub fn recording_key(owner_id: Uuid, recording_id: Uuid) -> String {
    format!("recordings/{owner_id}/{recording_id}.bin")
}

pub struct S3RecordingStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3RecordingStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl RecordingStore for S3RecordingStore {
    async fn put(&self, owner_id: Uuid, audio: Bytes, content_type: &str) -> Result<String, AppError> {
        let key = recording_key(owner_id, Uuid::new_v4());
        let size = audio.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(audio))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded {size}-byte recording to s3://{}/{}", self.bucket, key);
        Ok(key)
    }
}
