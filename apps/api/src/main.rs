mod config;
mod errors;
mod llm_client;
mod models;
mod notification;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::notification::{MailCredentials, MailRelayNotifier};
use crate::routes::build_router;
use crate::screening::analyzer::LlmResumeAnalyzer;
use crate::screening::salary::LakhSalaryEstimator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screening API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM-backed resume analyzer
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize notification relay (credentials are only checked when sending)
    let credentials = match (&config.email_user, &config.email_pass) {
        (Some(user), Some(pass)) => Some(MailCredentials {
            user: user.clone(),
            pass: pass.clone(),
        }),
        _ => {
            warn!("EMAIL_USER / EMAIL_PASS not set; rejection emails will fail");
            None
        }
    };
    let notifier = MailRelayNotifier::new(config.mail_api_url.clone(), credentials)?;

    info!(
        "Pipeline: concurrency={}, failure_policy={:?}",
        config.analysis_concurrency, config.failure_policy
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(LlmResumeAnalyzer(llm)),
        estimator: Arc::new(LakhSalaryEstimator),
        notifier: Arc::new(notifier),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the results UI host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
