// Interview wizard: the per-owner state machine that drives upload →
// analysis → question loop → final summary, plus the session and recording
// stores it writes to.

pub mod controller;
pub mod handlers;
pub mod pipeline;
pub mod recordings;
pub mod registry;
pub mod session_store;

pub use pipeline::InterviewPipeline;
pub use recordings::{RecordingStore, S3RecordingStore};
pub use registry::InterviewRegistry;
pub use session_store::{PgSessionStore, SessionStore};
