//! Axum route handlers for candidate notifications.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::candidate::CandidateAnalysis;
use crate::notification::send_rejection_email;
use crate::state::AppState;

/// POST /api/v1/candidates/rejection-email
///
/// Sends the rejection letter to one candidate from a previously returned
/// analysis result.
pub async fn handle_rejection_email(
    State(state): State<AppState>,
    Json(candidate): Json<CandidateAnalysis>,
) -> Result<StatusCode, AppError> {
    send_rejection_email(state.notifier.as_ref(), &candidate).await?;
    Ok(StatusCode::NO_CONTENT)
}
