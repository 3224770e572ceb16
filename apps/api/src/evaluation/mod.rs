// Answer evaluation: a two-stage prompt chain.
// Stage 1 condenses the résumé against one question; stage 2 scores the
// transcript with the STAR rubric using the condensed résumé as evidence.
// Stage 2 never runs unless stage 1 succeeded.

pub mod condenser;
pub mod evaluator;
pub mod handlers;
pub mod prompts;

pub use condenser::ResumeCondenser;
pub use evaluator::{EvaluationInput, ResponseEvaluator, ScoreReport, StarAnalysis};
