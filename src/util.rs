//! Shared utility functions.

use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, Result};

/// Upper bound on any single Stripe or Google API call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client shared by the Stripe and Google Sheets integrations.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("afterparty/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}
