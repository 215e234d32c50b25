use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown in place of an interview answer the model did not provide.
pub const NO_MODEL_ANSWER: &str = "No model answer provided.";

/// The job a batch of resumes is ranked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobContext {
    pub job_description: String,
    /// Free-form, e.g. "9 lakh per annum".
    pub expected_salary: String,
    pub shortlist_count: usize,
}

/// An encoded resume as uploaded: media type plus base64 payload, never decoded here.
///
/// Resumes carry no identifier of their own; a resume is known by its position
/// in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub media_type: String,
    pub base64_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("data URI must start with 'data:'")]
    MissingScheme,
    #[error("data URI must be base64 encoded")]
    NotBase64,
    #[error("data URI declares no media type")]
    MissingMediaType,
    #[error("data URI has an empty payload")]
    EmptyPayload,
}

impl ResumeDocument {
    /// Parses `data:<mime>;base64,<payload>`. Media type parameters other than the
    /// base64 marker (e.g. `;charset=utf-8`) are dropped.
    pub fn from_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::NotBase64)?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default().trim().to_lowercase();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::NotBase64);
        }
        if media_type.is_empty() {
            return Err(DataUriError::MissingMediaType);
        }
        if payload.trim().is_empty() {
            return Err(DataUriError::EmptyPayload);
        }

        Ok(Self {
            media_type,
            base64_data: payload.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
}

/// Where a candidate ended up once the pipeline has finished with it.
///
/// `RejectedUnfinalized` covers rejected candidates with no captured email: their
/// record keeps whatever provisional classification assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Shortlisted,
    Rejected,
    RejectedUnfinalized,
}

/// One analyzed resume. Built by the analyzer, then mutated in place by the
/// classification and finalize passes of the ranking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 0 – 100
    pub match_score: f64,
    #[serde(default)]
    pub top_skills: Vec<String>,
    #[serde(default)]
    pub highlights: String,
    #[serde(default)]
    pub weak_points: String,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    /// Index-aligned with `interview_questions`; may be shorter.
    #[serde(default)]
    pub model_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_email: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub status: CandidateStatus,
}

impl CandidateAnalysis {
    /// The model answer paired with `interview_questions[i]`. The answer list may be
    /// shorter than the question list; a missing entry reads as `NO_MODEL_ANSWER`.
    #[allow(dead_code)] // read by results renderers, not by the ranking passes
    pub fn model_answer(&self, i: usize) -> &str {
        self.model_answers
            .get(i)
            .map(String::as_str)
            .unwrap_or(NO_MODEL_ANSWER)
    }
}
