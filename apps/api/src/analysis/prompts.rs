// All LLM prompt constants for the Analysis module.

pub const ANALYSIS_SYSTEM: &str = "You are an expert behavioral interview coach. \
    You map a candidate and a role onto a fixed set of leadership principles \
    and write behavioral interview questions for them.";

/// Analysis prompt template.
/// Replace: {principle_count}, {question_count}, {catalog}, {job_description}, {resume}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the job description and resume below.

1. Identify the {principle_count} leadership principles most relevant to this role, chosen ONLY from the catalog.
2. Give each a relevance score from 0 to 100 based on the job requirements. Scores are independent and do not need to sum to anything.
3. List exactly 3 key behaviors for each principle as they apply to this role.
4. Write {question_count} behavioral interview questions. Each question must target one of the principles you selected.
5. For every question give STAR guidance: what the candidate should cover in each part. These are prompts, NOT sample answers.

LEADERSHIP PRINCIPLE CATALOG (use these titles exactly):
{catalog}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume}

Return a JSON object with this EXACT schema (no extra fields):
{
  "principles": [
    {
      "title": "Customer Obsession",
      "description": "Leaders start with the customer and work backwards.",
      "relevance_score": 95,
      "key_behaviors": ["Customer-first thinking", "Data-driven decisions", "Long-term relationship building"]
    }
  ],
  "questions": [
    {
      "principle": "Customer Obsession",
      "question_text": "Tell me about a time when you had to choose between what was best for the customer and what was easier for your team.",
      "context": "Focus on a situation where customer needs conflicted with internal constraints.",
      "star_framework": {
        "situation": "Describe the context and customer need",
        "task": "What was your responsibility?",
        "action": "What steps did you take?",
        "result": "What was the customer impact?"
      }
    }
  ]
}

HARD RULES:
1. EXACTLY {principle_count} principles, each title copied from the catalog, no duplicates
2. relevance_score is an integer between 0 and 100
3. Every question's "principle" must be one of the titles you selected
4. Questions must be answerable from the candidate's own experience"#;
