//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::{CandidateAnalysis, JobContext};
use crate::screening::pipeline::{rank_candidates, AnalysisFailure, PipelineOptions};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Analyzing,
    /// "standard", anything unrecognised, or no mode at all: nothing is analyzed.
    #[default]
    #[serde(other)]
    Standard,
}

/// The form sends the shortlist size as a string; plain numbers are accepted too.
/// Fractional numbers are truncated toward zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShortlistCount {
    Number(i64),
    Fractional(f64),
    Text(String),
}

impl ShortlistCount {
    /// Non-positive values map to 0 so the pipeline's own validation reports them.
    fn to_count(&self) -> Result<usize, AppError> {
        let n = match self {
            ShortlistCount::Number(n) => *n,
            ShortlistCount::Fractional(f) => f.trunc() as i64,
            ShortlistCount::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                AppError::Validation(format!(
                    "numCandidatesToShortlist must be a whole number, got '{s}'"
                ))
            })?,
        };
        Ok(usize::try_from(n).unwrap_or(0))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub expected_salary: String,
    #[serde(default)]
    pub analysis_mode: AnalysisMode,
    #[serde(default)]
    pub resume_data_uris: Vec<String>,
    #[serde(default)]
    pub num_candidates_to_shortlist: Option<ShortlistCount>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub job_title: String,
    pub analysis_results: Vec<CandidateAnalysis>,
    pub failures: Vec<AnalysisFailure>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Ranks the uploaded resumes against the job description. Only the
/// "analyzing" mode runs the pipeline; any other mode returns no results.
/// Results are not stored; the caller keeps them for later display.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.analysis_mode != AnalysisMode::Analyzing {
        return Ok(Json(AnalyzeResponse {
            job_title: request.job_title,
            analysis_results: vec![],
            failures: vec![],
        }));
    }

    let job = JobContext {
        job_description: request.job_description,
        expected_salary: request.expected_salary,
        shortlist_count: request
            .num_candidates_to_shortlist
            .as_ref()
            .ok_or_else(|| {
                AppError::Validation("numCandidatesToShortlist is required".to_string())
            })?
            .to_count()?,
    };

    let options = PipelineOptions {
        concurrency: state.config.analysis_concurrency,
        failure_policy: state.config.failure_policy,
    };

    let outcome = rank_candidates(
        state.analyzer.as_ref(),
        state.estimator.as_ref(),
        options,
        &job,
        &request.resume_data_uris,
    )
    .await?;

    Ok(Json(AnalyzeResponse {
        job_title: request.job_title,
        analysis_results: outcome.candidates,
        failures: outcome.failures,
    }))
}
