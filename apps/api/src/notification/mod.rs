//! Notification — delivers rejection emails through an HTTP mail relay.
//!
//! Delivery is a per-candidate action triggered after ranking; a failure here
//! never touches stored analysis results.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::candidate::CandidateAnalysis;
use crate::screening::rejection::{rejection_letter, EMAIL_SUBJECT};

pub mod handlers;

const SENDER_NAME: &str = "AI Resume Analyzer";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Missing email credentials. Ensure EMAIL_USER and EMAIL_PASS are set.")]
    MissingCredentials,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Mail relay rejected the message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Sends one message. No retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct MailCredentials {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Posts messages as JSON to a mail relay, authenticating with basic auth.
#[derive(Clone)]
pub struct MailRelayNotifier {
    client: Client,
    endpoint: String,
    credentials: Option<MailCredentials>,
}

impl MailRelayNotifier {
    pub fn new(
        endpoint: String,
        credentials: Option<MailCredentials>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }
}

#[async_trait]
impl Notifier for MailRelayNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(DeliveryError::MissingCredentials)?;

        let request = MailRequest {
            from: format!("\"{SENDER_NAME}\" <{}>", credentials.user),
            to: recipient,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&credentials.user, Some(&credentials.pass))
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_success() {
            info!("Email sent to {recipient}");
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        warn!("Mail relay returned {status}: {message}");
        Err(classify_status(status, message))
    }
}

fn classify_transport_error(e: reqwest::Error) -> DeliveryError {
    if e.is_connect() || e.is_timeout() {
        DeliveryError::Connection(
            "Check network connectivity or firewall settings.".to_string(),
        )
    } else {
        DeliveryError::Connection(e.to_string())
    }
}

/// 401/403 are credential problems; relays that proxy SMTP report a refused
/// login as "535" in the body.
fn classify_status(status: StatusCode, message: String) -> DeliveryError {
    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || message.contains("535")
    {
        DeliveryError::Authentication(
            "Check EMAIL_USER and EMAIL_PASS. If the account uses 2FA, use an app password."
                .to_string(),
        )
    } else {
        DeliveryError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

/// Sends the rejection letter to one candidate. The candidate needs both a name
/// and an email address.
pub async fn send_rejection_email(
    notifier: &dyn Notifier,
    candidate: &CandidateAnalysis,
) -> Result<(), AppError> {
    let (Some(name), Some(email)) = (
        candidate.name.as_deref(),
        candidate.candidate_email.as_deref(),
    ) else {
        return Err(AppError::Validation(
            "Candidate email or name is missing.".to_string(),
        ));
    };

    let body = rejection_letter(name, candidate);
    notifier.send(email, EMAIL_SUBJECT, &body).await?;
    Ok(())
}
