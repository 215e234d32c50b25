use std::sync::Arc;

use crate::config::Config;
use crate::notification::Notifier;
use crate::screening::analyzer::ResumeAnalyzer;
use crate::screening::salary::SalaryEstimator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable resume analyzer. Default: LlmResumeAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Pluggable salary estimator. Default: LakhSalaryEstimator.
    pub estimator: Arc<dyn SalaryEstimator>,
    pub notifier: Arc<dyn Notifier>,
}
