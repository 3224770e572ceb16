// Document analysis: résumé + job description → ranked leadership principles
// and the behavioral question set for one interview run.
// All LLM calls go through llm_client::TextGenerator.

pub mod analyzer;
pub mod catalog;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompts;

pub use analyzer::DocumentAnalyzer;
pub use models::{LeadershipPrinciple, Question};
