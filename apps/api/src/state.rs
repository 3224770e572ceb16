use std::sync::Arc;

use uuid::Uuid;

use crate::interview::{InterviewPipeline, InterviewRegistry, RecordingStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The pseudo-user every request acts as. Comes from `OWNER_ID`.
    pub owner_id: Uuid,
    pub pipeline: InterviewPipeline,
    pub recordings: Arc<dyn RecordingStore>,
    pub interviews: Arc<InterviewRegistry>,
    /// Body limit for the recordings route; audio outgrows axum's 2 MiB default.
    pub max_recording_bytes: usize,
}
