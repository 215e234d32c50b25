//! Resume Analyzer — turns one (job description, resume) pair into a `CandidateAnalysis`.
//!
//! Default: `LlmResumeAnalyzer`, which sends the resume to Claude as an attachment.
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>` so tests and alternative backends
//! can be swapped in without touching the pipeline.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::{Attachment, LlmClient, LlmError};
use crate::models::candidate::{
    CandidateAnalysis, CandidateStatus, DataUriError, Project, ResumeDocument,
};
use crate::screening::prompts::{analysis_system, ANALYSIS_PROMPT_TEMPLATE};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Resume could not be decoded: {0}")]
    InvalidDocument(String),

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Analyzer returned unusable output: {0}")]
    InvalidOutput(String),
}

impl From<DataUriError> for AnalysisError {
    fn from(e: DataUriError) -> Self {
        AnalysisError::InvalidDocument(e.to_string())
    }
}

/// Single-resume analysis. No retry at this layer.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    /// `resume` is a `data:<mime>;base64,<payload>` URI.
    async fn analyze(
        &self,
        job_description: &str,
        resume: &str,
    ) -> Result<CandidateAnalysis, AnalysisError>;
}

/// Raw analyzer output as the model returns it. Every field is lenient; the
/// conversion into `CandidateAnalysis` normalizes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    name: Option<String>,
    match_score: Option<f64>,
    #[serde(default)]
    top_skills: Vec<String>,
    #[serde(default)]
    highlights: String,
    #[serde(default)]
    weak_points: String,
    #[serde(default)]
    suggestions: String,
    #[serde(default)]
    interview_questions: Vec<String>,
    #[serde(default)]
    model_answers: Vec<String>,
    candidate_email: Option<String>,
    #[serde(default)]
    projects: Option<Vec<Project>>,
}

impl TryFrom<RawAnalysis> for CandidateAnalysis {
    type Error = AnalysisError;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        let score = raw
            .match_score
            .filter(|s| s.is_finite())
            .ok_or_else(|| AnalysisError::InvalidOutput("missing matchScore".to_string()))?;

        Ok(CandidateAnalysis {
            name: non_blank(raw.name),
            match_score: score.clamp(0.0, 100.0),
            top_skills: raw.top_skills,
            highlights: raw.highlights,
            weak_points: raw.weak_points,
            suggestions: raw.suggestions,
            interview_questions: raw.interview_questions,
            model_answers: raw.model_answers,
            candidate_email: non_blank(raw.candidate_email),
            projects: raw.projects.unwrap_or_default(),
            rank: None,
            salary_suggestion: None,
            rejection_reason: None,
            status: CandidateStatus::Pending,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct LlmResumeAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(
        &self,
        job_description: &str,
        resume: &str,
    ) -> Result<CandidateAnalysis, AnalysisError> {
        let document = ResumeDocument::from_data_uri(resume)?;
        let attachment = attachment_for(&document)?;

        let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{job_description}", job_description);
        let raw: RawAnalysis = self
            .0
            .call_json(&prompt, &analysis_system(), Some(attachment))
            .await?;

        CandidateAnalysis::try_from(raw)
    }
}

fn attachment_for(document: &ResumeDocument) -> Result<Attachment<'_>, AnalysisError> {
    let media_type = document.media_type.as_str();
    let data = document.base64_data.as_str();
    if media_type == "application/pdf" {
        Ok(Attachment::Document { media_type, data })
    } else if media_type.starts_with("image/") {
        Ok(Attachment::Image { media_type, data })
    } else {
        Err(AnalysisError::InvalidDocument(format!(
            "unsupported media type '{media_type}'"
        )))
    }
}
