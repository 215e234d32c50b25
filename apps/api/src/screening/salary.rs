//! Salary estimation and rank bands.
//!
//! Two separate stages feed a candidate's `salary_suggestion`:
//! - a provisional estimate from the `SalaryEstimator`, computed for every candidate
//!   scoring 50 or more;
//! - a fixed band looked up by rank, which replaces the estimate for shortlisted candidates.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Returned whenever the expected salary cannot be interpreted.
pub const DEFAULT_BAND: &str = "50,000 to 60,000 per month";

/// Leading phrase some estimators put before the range. Stripped before storing.
pub const ESTIMATE_PREFIX: &str = "Based on your qualifications, a suggested salary is in the range of ";

const CURRENCY: &str = "₹";
const LAKH: f64 = 100_000.0;
const BAND_SPREAD: f64 = 0.10;

/// Monthly bands for shortlisted ranks. Only ranks 1–5 have a band.
const RANK_BANDS: [(u32, &str); 5] = [
    (1, "75,000 – 91,666"),
    (2, "66,666 – 75,000"),
    (3, "58,333 – 66,666"),
    (4, "50,000 – 58,333"),
    (5, "41,666 – 50,000"),
];

/// Failure of a fallible estimator backend. The lakh estimator never returns it;
/// the pipeline answers it with `DEFAULT_BAND`.
#[allow(dead_code)] // constructed only by backends other than `LakhSalaryEstimator`
#[derive(Debug, Error)]
#[error("Salary estimation failed: {0}")]
pub struct SalaryEstimateError(pub String);

/// Inputs available to a salary estimate. The default estimator only reads
/// `expected_salary`; the rest is there for richer backends.
#[derive(Debug, Clone, Copy)]
pub struct SalaryQuery<'a> {
    pub job_description: &'a str,
    pub expected_salary: &'a str,
    /// The candidate's own resume data URI.
    pub resume: &'a str,
    /// Comma-joined top skills.
    pub top_skills: &'a str,
    pub highlights: &'a str,
}

#[async_trait]
pub trait SalaryEstimator: Send + Sync {
    /// Returns a monthly range, e.g. `"68,000 to 83,000 per month"`.
    async fn estimate(&self, query: SalaryQuery<'_>) -> Result<String, SalaryEstimateError>;
}

/// Derives a ±10% monthly band from an annual figure given in lakhs
/// ("9 lakh per annum"). Never fails: anything unparsable yields `DEFAULT_BAND`.
pub struct LakhSalaryEstimator;

#[async_trait]
impl SalaryEstimator for LakhSalaryEstimator {
    async fn estimate(&self, query: SalaryQuery<'_>) -> Result<String, SalaryEstimateError> {
        debug!(
            expected = query.expected_salary,
            skills = query.top_skills,
            highlights_len = query.highlights.len(),
            resume_len = query.resume.len(),
            jd_len = query.job_description.len(),
            "Estimating salary"
        );
        Ok(estimate_from_expected(query.expected_salary))
    }
}

pub fn estimate_from_expected(expected_salary: &str) -> String {
    match annual_lakhs(expected_salary) {
        Some(lakhs) => {
            let monthly = lakhs * LAKH / 12.0;
            format_band(monthly * (1.0 - BAND_SPREAD), monthly * (1.0 + BAND_SPREAD))
        }
        None => DEFAULT_BAND.to_string(),
    }
}

/// The number immediately before the first "lakh" token, if it is a positive amount.
fn annual_lakhs(expected_salary: &str) -> Option<f64> {
    let tokens: Vec<&str> = expected_salary.split_whitespace().collect();
    let unit_at = tokens.iter().position(|t| t.eq_ignore_ascii_case("lakh"))?;
    let amount = tokens.get(unit_at.checked_sub(1)?)?.parse::<f64>().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Each bound rounded to the nearest thousand, halves rounding up.
fn format_band(lower: f64, upper: f64) -> String {
    let lower = (lower / 1000.0).round() as i64;
    let upper = (upper / 1000.0).round() as i64;
    format!("{lower},000 to {upper},000 per month")
}

/// Turns estimator output into the stored provisional suggestion.
pub fn provisional_suggestion(estimate: &str) -> String {
    let range = estimate.strip_prefix(ESTIMATE_PREFIX).unwrap_or(estimate);
    format!("{CURRENCY}{range}")
}

/// The fixed band for a shortlisted rank, or `None` past the end of the table.
pub fn band_for_rank(rank: u32) -> Option<String> {
    RANK_BANDS
        .iter()
        .find(|(r, _)| *r == rank)
        .map(|(_, band)| format!("{CURRENCY}{band} per month"))
}
