// All LLM prompt constants for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

pub const CONDENSE_SYSTEM: &str = "You are a resume extraction expert. \
    Extract only the most relevant information from a resume for one specific interview question. \
    You copy facts; you never write new ones.";

/// Condensation prompt template.
/// Replace: {question_text}, {leadership_principle}, {word_cap}, {no_fabrication}, {resume}
pub const CONDENSE_PROMPT_TEMPLATE: &str = r#"Extract only the sections of this resume that help answer the interview question below.

Question: {question_text}
Leadership Principle: {leadership_principle}

{no_fabrication}

INSTRUCTIONS:
1. Extract ONLY experiences, projects, skills, and achievements relevant to this question and leadership principle
2. Copy role titles, company names, and dates VERBATIM for every position you keep
3. Preserve every number, percentage, and concrete result exactly as written
4. Maintain chronological order and enough context to understand each item
5. Output at most {word_cap} words. Quality over quantity: include only what is needed for this question
6. Return plain text, structured and ready to use for interview analysis. No preamble, no commentary

FULL RESUME:
{resume}"#;

pub const EVALUATION_SYSTEM: &str = "You are an expert behavioral interviewer and recruiter. \
    You evaluate a candidate's spoken answer with the STAR framework and coach them \
    toward a stronger answer built from their own experience.";

/// Evaluation prompt template.
/// Replace: {question_text}, {leadership_principle}, {transcript}, {resume},
///          {job_description}, {no_fabrication}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are interviewing the candidate. You asked the question below and the candidate gave the answer below.
Evaluate the answer against the question, the candidate's resume, and the job description.

Question Asked: {question_text}
Leadership Principle: {leadership_principle}

Candidate's Answer (transcript):
{transcript}

Candidate's Resume (relevant extract):
{resume}

Job Description:
{job_description}

{no_fabrication}

Return a JSON object with this EXACT schema:
{
  "overall": {
    "score": 78,
    "feedback": "One line: the single most important takeaway"
  },
  "star": {
    "situation": {"score": 82, "feedback": "How clearly the context and stakes were set"},
    "task": {"score": 78, "feedback": "How clearly the objective and the candidate's ownership were stated"},
    "action": {"score": 74, "feedback": "How specific the steps the candidate personally took were"},
    "result": {"score": 72, "feedback": "Whether the outcome was quantified and its durable impact shown"}
  },
  "suggested_answer": {
    "situation": "A full paragraph",
    "task": "A full paragraph",
    "action": "A full paragraph",
    "result": "A full paragraph"
  },
  "job_alignment": [
    "Why the suggested answer maps to a specific job requirement"
  ]
}

HARD RULES:
1. Every score is an integer from 0 to 100; score each STAR component independently
2. The suggested answer restructures the candidate's story into STAR. Each component is a substantive paragraph grounded in facts from the resume and answer, never generic filler
3. job_alignment has 3 to 5 bullets, each tied to a requirement in the job description
4. Analyse THIS answer; the schema values above are placeholders, not content"#;
