use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::notification::DeliveryError;
use crate::screening::analyzer::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A per-resume analysis call failed. Fatal to the whole batch under the abort policy.
    #[error("Analysis of resume {index} failed: {source}")]
    Analysis {
        index: usize,
        #[source]
        source: AnalysisError,
    },

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Analysis { index, source } => {
                tracing::error!("Analysis error on resume {index}: {source}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_ERROR",
                    format!("Resume {} could not be analyzed", index + 1),
                )
            }
            AppError::Delivery(e) => {
                tracing::error!("Delivery error: {e}");
                let (status, code) = match e {
                    DeliveryError::MissingCredentials => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DELIVERY_MISSING_CREDENTIALS",
                    ),
                    DeliveryError::Authentication(_) => {
                        (StatusCode::BAD_GATEWAY, "DELIVERY_AUTH_FAILED")
                    }
                    DeliveryError::Connection(_) => {
                        (StatusCode::BAD_GATEWAY, "DELIVERY_CONNECTION_FAILED")
                    }
                    DeliveryError::Rejected { .. } => (StatusCode::BAD_GATEWAY, "DELIVERY_REJECTED"),
                };
                (status, code, e.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
