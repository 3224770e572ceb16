use std::sync::Arc;

use crate::analysis::DocumentAnalyzer;
use crate::documents::DocumentStore;
use crate::evaluation::{ResponseEvaluator, ResumeCondenser};
use crate::interview::session_store::SessionStore;

/// The collaborators the interview controller drives, one per stage.
#[derive(Clone)]
pub struct InterviewPipeline {
    pub documents: Arc<dyn DocumentStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub analyzer: DocumentAnalyzer,
    pub condenser: ResumeCondenser,
    pub evaluator: ResponseEvaluator,
}
