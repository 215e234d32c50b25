//! Ranking Pipeline — turns a batch of resumes into an ordered, annotated shortlist.
//!
//! Flow: validate → collect (one analysis per resume, input order) → rank order
//!       (stable sort by score) → classify (provisional reason / salary) →
//!       finalize (shortlist ranks + bands, rejected reasons) → shortlisted ++ rejected.
//!
//! Each pass is its own function so the provisional salary estimate and the
//! rank-band overwrite stay observable as separate stages.

use std::str::FromStr;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateAnalysis, CandidateStatus, JobContext};
use crate::screening::analyzer::{AnalysisError, ResumeAnalyzer};
use crate::screening::rejection::{below_threshold_reason, detailed_reason, MIN_MATCH_SCORE};
use crate::screening::salary::{
    band_for_rank, provisional_suggestion, SalaryEstimator, SalaryQuery, DEFAULT_BAND,
};

/// What to do when one resume in a batch cannot be analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure fails the batch; no partial output.
    #[default]
    Abort,
    /// Failed resumes are left out of the ranking and reported alongside it.
    Isolate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown failure policy '{0}'")]
pub struct UnknownFailurePolicy(pub String);

impl FromStr for FailurePolicy {
    type Err = UnknownFailurePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "isolate" => Ok(FailurePolicy::Isolate),
            other => Err(UnknownFailurePolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Analyses in flight at once. Output order never depends on it.
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// A resume that could not be analyzed under `FailurePolicy::Isolate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFailure {
    /// Zero-based position in the input sequence.
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingOutcome {
    /// Shortlisted in rank order, then rejected in score order.
    pub candidates: Vec<CandidateAnalysis>,
    pub failures: Vec<AnalysisFailure>,
}

/// A candidate together with the input position of the resume it came from.
#[derive(Debug, Clone)]
struct Ranked {
    index: usize,
    candidate: CandidateAnalysis,
}

/// Runs every pass over one batch. Each call is independent; nothing is shared
/// between invocations.
pub async fn rank_candidates(
    analyzer: &dyn ResumeAnalyzer,
    estimator: &dyn SalaryEstimator,
    options: PipelineOptions,
    job: &JobContext,
    resumes: &[String],
) -> Result<RankingOutcome, AppError> {
    validate(job, resumes)?;

    let span = info_span!(
        "rank_batch",
        batch_id = %Uuid::new_v4(),
        resumes = resumes.len(),
        shortlist = job.shortlist_count
    );

    async move {
        // Pass 1: collect
        let results = collect(analyzer, options, &job.job_description, resumes).await;
        let (mut ranked, failures) = settle(results, options.failure_policy)?;
        info!(
            "Collected {} analyses ({} failed)",
            ranked.len(),
            failures.len()
        );

        // Pass 2: rank order
        rank_order(&mut ranked);

        // Pass 3: provisional classification
        classify(&mut ranked, estimator, job, resumes).await;

        // Pass 4: partition and finalize
        let candidates = finalize(ranked, job.shortlist_count);
        info!(
            "Batch finalized: {} shortlisted of {}",
            candidates
                .iter()
                .filter(|c| c.status == CandidateStatus::Shortlisted)
                .count(),
            candidates.len()
        );

        Ok::<_, AppError>(RankingOutcome {
            candidates,
            failures,
        })
    }
    .instrument(span)
    .await
}

/// Rejects malformed input before any adapter is called.
pub fn validate(job: &JobContext, resumes: &[String]) -> Result<(), AppError> {
    if job.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    if resumes.is_empty() {
        return Err(AppError::Validation(
            "At least one resume is required".to_string(),
        ));
    }
    if job.shortlist_count < 1 {
        return Err(AppError::Validation(
            "shortlistCount must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Pass 1. Analyses may run concurrently but results come back keyed and ordered
/// by input index. Under `Abort` nothing is started past the first failure seen.
async fn collect(
    analyzer: &dyn ResumeAnalyzer,
    options: PipelineOptions,
    job_description: &str,
    resumes: &[String],
) -> Vec<(usize, Result<CandidateAnalysis, AnalysisError>)> {
    // Built eagerly so the handler future stays `Send` across borrow lifetimes.
    let pending: Vec<_> = resumes
        .iter()
        .enumerate()
        .map(|(index, resume)| async move {
            (index, analyzer.analyze(job_description, resume).await)
        })
        .collect();
    let mut analyses = std::pin::pin!(stream::iter(pending).buffered(options.concurrency.max(1)));

    let mut results = Vec::with_capacity(resumes.len());
    while let Some((index, result)) = analyses.next().await {
        let failed = result.is_err();
        if let Err(e) = &result {
            error!("Analysis of resume {index} failed: {e}");
        }
        results.push((index, result));
        if failed && options.failure_policy == FailurePolicy::Abort {
            break;
        }
    }
    results
}

/// Applies the failure policy to per-resume results.
fn settle(
    results: Vec<(usize, Result<CandidateAnalysis, AnalysisError>)>,
    policy: FailurePolicy,
) -> Result<(Vec<Ranked>, Vec<AnalysisFailure>), AppError> {
    let mut ranked = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for (index, result) in results {
        match result {
            Ok(candidate) => ranked.push(Ranked { index, candidate }),
            Err(source) => match policy {
                FailurePolicy::Abort => return Err(AppError::Analysis { index, source }),
                FailurePolicy::Isolate => failures.push(AnalysisFailure {
                    index,
                    message: source.to_string(),
                }),
            },
        }
    }

    Ok((ranked, failures))
}

/// Pass 2. Descending by score; `sort_by` is stable so ties keep input order,
/// which rank assignment depends on.
fn rank_order(ranked: &mut [Ranked]) {
    ranked.sort_by(|a, b| b.candidate.match_score.total_cmp(&a.candidate.match_score));
}

/// Pass 3. Every candidate is classified regardless of the eventual shortlist size.
/// The salary estimate here is provisional: shortlisted candidates get it replaced
/// by their rank band in `finalize`.
async fn classify(
    ranked: &mut [Ranked],
    estimator: &dyn SalaryEstimator,
    job: &JobContext,
    resumes: &[String],
) {
    for entry in ranked.iter_mut() {
        let candidate = &mut entry.candidate;

        if candidate.match_score < MIN_MATCH_SCORE {
            candidate.rejection_reason = Some(below_threshold_reason());
            candidate.salary_suggestion = None;
            continue;
        }

        let top_skills = candidate.top_skills.join(", ");
        let query = SalaryQuery {
            job_description: &job.job_description,
            expected_salary: &job.expected_salary,
            resume: &resumes[entry.index],
            top_skills: &top_skills,
            highlights: &candidate.highlights,
        };

        let estimate = match estimator.estimate(query).await {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!(
                    "Salary estimate for resume {} failed, using default band: {e}",
                    entry.index
                );
                DEFAULT_BAND.to_string()
            }
        };
        candidate.salary_suggestion = Some(provisional_suggestion(&estimate));
    }
}

/// Pass 4. The first `shortlist_count` candidates are shortlisted, the rest rejected.
fn finalize(ranked: Vec<Ranked>, shortlist_count: usize) -> Vec<CandidateAnalysis> {
    ranked
        .into_iter()
        .enumerate()
        .map(|(position, Ranked { index, mut candidate })| {
            if position < shortlist_count {
                let rank = (position + 1) as u32;
                candidate.rank = Some(rank);
                candidate.rejection_reason = None;
                candidate.salary_suggestion = band_for_rank(rank);
                if candidate.salary_suggestion.is_none() {
                    warn!("No salary band defined for rank {rank} (resume {index})");
                }
                candidate.status = CandidateStatus::Shortlisted;
            } else if candidate.candidate_email.is_some() {
                candidate.rejection_reason =
                    Some(detailed_reason(&candidate.weak_points, candidate.match_score));
                candidate.rank = None;
                candidate.salary_suggestion = None;
                candidate.status = CandidateStatus::Rejected;
            } else {
                // No way to contact the candidate: keep what classification set.
                candidate.status = CandidateStatus::RejectedUnfinalized;
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::screening::salary::{LakhSalaryEstimator, SalaryEstimateError};

    /// Answers from a table keyed by resume URI; optionally sleeps longer for
    /// earlier resumes so completion order is the reverse of input order.
    struct FakeAnalyzer {
        responses: HashMap<String, CandidateAnalysis>,
        reverse_completion: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeAnalyzer {
        fn new(entries: Vec<(String, CandidateAnalysis)>) -> Self {
            Self {
                responses: entries.into_iter().collect(),
                reverse_completion: false,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResumeAnalyzer for FakeAnalyzer {
        async fn analyze(
            &self,
            _job_description: &str,
            resume: &str,
        ) -> Result<CandidateAnalysis, AnalysisError> {
            self.calls.lock().unwrap().push(resume.to_string());
            if self.reverse_completion {
                let delay = 100 - self.calls.lock().unwrap().len() as u64 * 10;
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            self.responses
                .get(resume)
                .cloned()
                .ok_or_else(|| AnalysisError::InvalidDocument(format!("cannot decode {resume}")))
        }
    }

    /// Records which resume each estimate was requested for.
    struct RecordingEstimator {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingEstimator {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl SalaryEstimator for RecordingEstimator {
        async fn estimate(&self, query: SalaryQuery<'_>) -> Result<String, SalaryEstimateError> {
            self.seen.lock().unwrap().push(query.resume.to_string());
            if self.fail {
                return Err(SalaryEstimateError("estimator offline".to_string()));
            }
            Ok(format!(
                "Based on your qualifications, a suggested salary is in the range of 1,000 to 2,000 per month ({})",
                query.top_skills
            ))
        }
    }

    fn candidate(name: &str, score: f64, email: Option<&str>) -> CandidateAnalysis {
        CandidateAnalysis {
            name: Some(name.to_string()),
            match_score: score,
            top_skills: vec!["Rust".to_string(), "SQL".to_string()],
            highlights: format!("{name} highlights"),
            weak_points: "limited cloud experience".to_string(),
            suggestions: String::new(),
            interview_questions: vec![],
            model_answers: vec![],
            candidate_email: email.map(str::to_string),
            projects: vec![],
            rank: None,
            salary_suggestion: None,
            rejection_reason: None,
            status: CandidateStatus::Pending,
        }
    }

    fn uri(n: usize) -> String {
        format!("data:application/pdf;base64,cmVzdW1l{n}")
    }

    fn job(shortlist_count: usize) -> JobContext {
        JobContext {
            job_description: "Senior backend engineer".to_string(),
            expected_salary: "9 lakh per annum".to_string(),
            shortlist_count,
        }
    }

    fn batch(scores: &[(f64, Option<&str>)]) -> (FakeAnalyzer, Vec<String>) {
        let resumes: Vec<String> = (0..scores.len()).map(uri).collect();
        let entries = scores
            .iter()
            .enumerate()
            .map(|(i, (score, email))| {
                (resumes[i].clone(), candidate(&format!("c{i}"), *score, *email))
            })
            .collect();
        (FakeAnalyzer::new(entries), resumes)
    }

    fn names(candidates: &[CandidateAnalysis]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_deref().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_three_resume_scenario() {
        let (analyzer, resumes) = batch(&[(30.0, None), (65.0, None), (80.0, None)]);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(2),
            &resumes,
        )
        .await
        .unwrap();

        let c = &outcome.candidates;
        assert_eq!(names(c), vec!["c2", "c1", "c0"]);

        assert_eq!(c[0].rank, Some(1));
        assert_eq!(c[0].salary_suggestion.as_deref(), Some("₹75,000 – 91,666 per month"));
        assert_eq!(c[1].rank, Some(2));
        assert_eq!(c[1].salary_suggestion.as_deref(), Some("₹66,666 – 75,000 per month"));
        assert!(c[0].rejection_reason.is_none() && c[1].rejection_reason.is_none());

        // Score 30 without an email keeps the below-threshold reason.
        assert_eq!(c[2].rank, None);
        assert_eq!(c[2].rejection_reason, Some(below_threshold_reason()));
        assert!(c[2].salary_suggestion.is_none());
        assert_eq!(c[2].status, CandidateStatus::RejectedUnfinalized);
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_output_length_matches_input() {
        let (analyzer, resumes) =
            batch(&[(10.0, None), (90.0, Some("a@x.io")), (55.0, None), (70.0, None)]);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap();
        assert_eq!(outcome.candidates.len(), resumes.len());
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let (analyzer, resumes) = batch(&[(70.0, None), (90.0, None), (70.0, None), (70.0, None)]);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(3),
            &resumes,
        )
        .await
        .unwrap();
        assert_eq!(names(&outcome.candidates), vec!["c1", "c0", "c2", "c3"]);
        assert_eq!(outcome.candidates[1].rank, Some(2));
        assert_eq!(outcome.candidates[2].rank, Some(3));
        assert_eq!(outcome.candidates[3].rank, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_collection_is_index_ordered() {
        let (mut analyzer, resumes) =
            batch(&[(60.0, None), (60.0, None), (60.0, None), (60.0, None)]);
        analyzer.reverse_completion = true;
        let options = PipelineOptions {
            concurrency: 4,
            failure_policy: FailurePolicy::Abort,
        };
        let outcome = rank_candidates(&analyzer, &LakhSalaryEstimator, options, &job(4), &resumes)
            .await
            .unwrap();
        // Equal scores: any order other than input order means completion order leaked.
        assert_eq!(names(&outcome.candidates), vec!["c0", "c1", "c2", "c3"]);
        let ranks: Vec<_> = outcome.candidates.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[tokio::test]
    async fn test_shortlist_larger_than_batch_ranks_everyone() {
        let (analyzer, resumes) = batch(&[(20.0, Some("a@x.io")), (75.0, None)]);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(5),
            &resumes,
        )
        .await
        .unwrap();
        assert!(outcome
            .candidates
            .iter()
            .all(|c| c.status == CandidateStatus::Shortlisted && c.rejection_reason.is_none()));
        assert_eq!(outcome.candidates[1].rank, Some(2));
    }

    #[tokio::test]
    async fn test_shortlist_equal_to_batch_leaves_no_rejections() {
        let (analyzer, resumes) = batch(&[(40.0, None), (60.0, None), (80.0, None)]);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(3),
            &resumes,
        )
        .await
        .unwrap();
        let ranks: Vec<_> = outcome.candidates.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3)]);
        // A sub-50 candidate that makes the shortlist loses its provisional reason.
        assert!(outcome.candidates[2].rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_rank_band_replaces_provisional_estimate() {
        let (analyzer, resumes) = batch(&[(95.0, None), (85.0, None), (75.0, None)]);
        let estimator = RecordingEstimator::new();
        let outcome = rank_candidates(
            &analyzer,
            &estimator,
            PipelineOptions::default(),
            &job(3),
            &resumes,
        )
        .await
        .unwrap();
        assert_eq!(estimator.seen.lock().unwrap().len(), 3);
        assert_eq!(
            outcome.candidates[2].salary_suggestion.as_deref(),
            Some("₹58,333 – 66,666 per month")
        );
    }

    #[tokio::test]
    async fn test_unfinalized_reject_keeps_provisional_estimate() {
        let (analyzer, resumes) = batch(&[(90.0, None), (65.0, None)]);
        let estimator = RecordingEstimator::new();
        let outcome = rank_candidates(
            &analyzer,
            &estimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap();
        let rejected = &outcome.candidates[1];
        assert_eq!(rejected.status, CandidateStatus::RejectedUnfinalized);
        assert_eq!(
            rejected.salary_suggestion.as_deref(),
            Some("₹1,000 to 2,000 per month (Rust, SQL)")
        );
        assert!(rejected.rejection_reason.is_none());
        assert!(rejected.rank.is_none());
    }

    #[tokio::test]
    async fn test_reachable_reject_gets_detailed_reason() {
        let (analyzer, resumes) = batch(&[(42.0, Some("sam@example.com")), (88.0, None)]);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap();
        let rejected = &outcome.candidates[1];
        assert_eq!(rejected.status, CandidateStatus::Rejected);
        let reason = rejected.rejection_reason.as_deref().unwrap();
        assert!(reason.contains("limited cloud experience"));
        assert!(reason.contains("42"));
        assert!(rejected.rank.is_none());
        assert!(rejected.salary_suggestion.is_none());
    }

    #[tokio::test]
    async fn test_estimator_sees_candidates_own_resume() {
        // Sorting reorders candidates; the estimate must still use each one's resume.
        let (analyzer, resumes) = batch(&[(55.0, None), (99.0, None)]);
        let estimator = RecordingEstimator::new();
        rank_candidates(
            &analyzer,
            &estimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap();
        let seen = estimator.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![resumes[1].clone(), resumes[0].clone()]);
    }

    #[tokio::test]
    async fn test_estimator_not_called_below_threshold() {
        let (analyzer, resumes) = batch(&[(49.9, None), (12.0, None)]);
        let estimator = RecordingEstimator::new();
        rank_candidates(
            &analyzer,
            &estimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap();
        assert!(estimator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_estimator_falls_back_to_default_band() {
        let (analyzer, resumes) = batch(&[(90.0, None), (70.0, None)]);
        let mut estimator = RecordingEstimator::new();
        estimator.fail = true;
        let outcome = rank_candidates(
            &analyzer,
            &estimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap();
        assert_eq!(
            outcome.candidates[1].salary_suggestion.as_deref(),
            Some("₹50,000 to 60,000 per month")
        );
    }

    #[tokio::test]
    async fn test_rank_past_band_table_has_no_band() {
        let scores: Vec<(f64, Option<&str>)> = (0..6).map(|i| (90.0 - i as f64, None)).collect();
        let (analyzer, resumes) = batch(&scores);
        let outcome = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(6),
            &resumes,
        )
        .await
        .unwrap();
        assert_eq!(outcome.candidates[5].rank, Some(6));
        assert!(outcome.candidates[5].salary_suggestion.is_none());
        assert_eq!(outcome.candidates[5].status, CandidateStatus::Shortlisted);
    }

    #[tokio::test]
    async fn test_abort_policy_fails_whole_batch() {
        let (analyzer, mut resumes) = batch(&[(90.0, None), (70.0, None)]);
        resumes.insert(1, "data:application/pdf;base64,Y29ycnVwdA==".to_string());
        resumes.push(uri(9));
        let err = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(1),
            &resumes,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Analysis { index: 1, .. }));
        // Sequential collection stops at the failing resume.
        assert_eq!(analyzer.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_policy_with_concurrency_reports_first_failure_in_input_order() {
        let (mut analyzer, mut resumes) = batch(&[(90.0, None), (70.0, None), (60.0, None)]);
        analyzer.reverse_completion = true;
        resumes.insert(1, "data:application/pdf;base64,Y29ycnVwdA==".to_string());
        let options = PipelineOptions {
            concurrency: 3,
            failure_policy: FailurePolicy::Abort,
        };
        // Resume 2 finishes before resume 1 fails; the failure still wins.
        let err = rank_candidates(&analyzer, &LakhSalaryEstimator, options, &job(2), &resumes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Analysis { index: 1, .. }));
        assert!(err.to_string().contains("cannot decode"));
    }

    #[tokio::test]
    async fn test_isolate_policy_reports_failures_and_ranks_the_rest() {
        let (analyzer, mut resumes) = batch(&[(60.0, None), (80.0, None)]);
        resumes.insert(1, "data:application/pdf;base64,Y29ycnVwdA==".to_string());
        let options = PipelineOptions {
            concurrency: 1,
            failure_policy: FailurePolicy::Isolate,
        };
        let outcome = rank_candidates(&analyzer, &LakhSalaryEstimator, options, &job(1), &resumes)
            .await
            .unwrap();
        assert_eq!(names(&outcome.candidates), vec!["c1", "c0"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert!(outcome.failures[0].message.contains("cannot decode"));
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_analysis() {
        let (analyzer, resumes) = batch(&[(60.0, None)]);

        let mut empty_jd = job(1);
        empty_jd.job_description = "   ".to_string();
        let err = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &empty_jd,
            &resumes,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(0),
            &resumes,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = rank_candidates(
            &analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(1),
            &[],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(analyzer.calls.lock().unwrap().is_empty());
    }

    async fn run_to_json(analyzer: &FakeAnalyzer, resumes: &[String]) -> String {
        let outcome = rank_candidates(
            analyzer,
            &LakhSalaryEstimator,
            PipelineOptions::default(),
            &job(2),
            resumes,
        )
        .await
        .unwrap();
        serde_json::to_string(&outcome).unwrap()
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let (analyzer, resumes) = batch(&[
            (30.0, Some("a@x.io")),
            (65.0, None),
            (80.0, None),
            (65.0, Some("b@x.io")),
        ]);
        let first = run_to_json(&analyzer, &resumes).await;
        let second = run_to_json(&analyzer, &resumes).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_failure_policy_parses() {
        assert_eq!("abort".parse::<FailurePolicy>(), Ok(FailurePolicy::Abort));
        assert_eq!(" Isolate ".parse::<FailurePolicy>(), Ok(FailurePolicy::Isolate));
        assert_eq!(
            "retry".parse::<FailurePolicy>(),
            Err(UnknownFailurePolicy("retry".to_string()))
        );
    }
}
