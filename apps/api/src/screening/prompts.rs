// LLM prompt constants for resume screening.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt for per-resume analysis.
pub fn analysis_system() -> String {
    format!(
        "You are an AI resume analyzer working for a hiring team. \
        Compare one attached resume against a job description. {JSON_ONLY_SYSTEM}"
    )
}

/// Analysis prompt template. Replace `{job_description}` before sending.
/// The resume itself travels as an attachment.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the attached resume and compare it to the job description below. Extract the candidate's name and email address from the resume.

Job Description:
{job_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Jane Doe",
  "matchScore": 72,
  "topSkills": ["Rust", "PostgreSQL"],
  "highlights": "Summary of the candidate's strengths.",
  "weakPoints": "Weaknesses or concerns.",
  "suggestions": "Suggestions to improve the resume.",
  "interviewQuestions": ["Tailored question"],
  "modelAnswers": ["Model answer for the question at the same position"],
  "candidateEmail": "jane@example.com",
  "projects": [
    {"name": "Project name", "description": "Brief description"}
  ]
}

Rules:
- matchScore is a number from 0 to 100: how well the resume matches the job description.
- modelAnswers[i] answers interviewQuestions[i].
- Omit "name" or "candidateEmail" if the resume does not state them. Do NOT invent them.
- If no projects are mentioned, return "projects": []."#;
