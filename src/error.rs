use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error(
        "No payment link configured for {} (checkout session {session_id})",
        .payment_link_id.as_deref().unwrap_or("<none>")
    )]
    CategoryLookup {
        session_id: String,
        payment_link_id: Option<String>,
    },

    #[error("Stripe API error: {0}")]
    Stripe(String),

    #[error("Google Sheets API error: {0}")]
    Sheets(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Client-facing error messages shared between modules and tests.
pub mod msg {
    pub const MISSING_SIGNATURE_HEADER: &str = "Missing stripe-signature header";
    pub const INVALID_SIGNATURE_HEADER: &str = "Invalid signature header";
    pub const INVALID_SIGNATURE_FORMAT: &str = "Invalid signature format";
    pub const INVALID_TIMESTAMP_IN_SIGNATURE: &str = "Invalid timestamp in signature";
    pub const INVALID_WEBHOOK_SECRET: &str = "Invalid webhook secret";
    pub const INVALID_EVENT_PAYLOAD: &str = "Invalid webhook payload";
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone())),
            AppError::InvalidSignature => (StatusCode::BAD_REQUEST, "Invalid signature", None),
            AppError::CategoryLookup { .. } => {
                tracing::error!("Guest list sync aborted: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Guest list sync failed", None)
            }
            AppError::Stripe(e) => {
                tracing::error!("Stripe error: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream provider error", None)
            }
            AppError::Sheets(e) => {
                tracing::error!("Sheets error: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream provider error", None)
            }
            AppError::Http(e) => {
                tracing::error!("HTTP error: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream provider error", None)
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                (StatusCode::BAD_REQUEST, "Invalid JSON", Some(e.to_string()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Anything that stops the service from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Startup error: {0}")]
    App(#[from] AppError),
}
