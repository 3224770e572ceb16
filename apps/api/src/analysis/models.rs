use serde::{Deserialize, Serialize};

/// A catalog principle as scored against one résumé/job-description pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadershipPrinciple {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0 – 100. Scores are independent; they need not sum to anything.
    pub relevance_score: u32,
    pub key_behaviors: Vec<String>,
}

/// Guidance for each STAR component. These are prompts for the candidate, not answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarHints {
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Title of the principle this question probes.
    pub principle: String,
    pub question_text: String,
    pub context: String,
    pub star_framework: StarHints,
}

/// Validated analyzer output. Principles are sorted by descending relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub principles: Vec<LeadershipPrinciple>,
    pub questions: Vec<Question>,
}
