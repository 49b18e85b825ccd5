use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result, msg};
use crate::models::SessionPage;

use super::{SESSION_PAGE_LIMIT, SessionSource};

type HmacSha256 = Hmac<Sha256>;

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Event type that triggers a guest list resync.
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(client: Client, secret_key: impl Into<String>) -> Self {
        Self {
            client,
            secret_key: secret_key.into(),
            api_base: STRIPE_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

/// Query parameters for one page of `GET /v1/checkout/sessions`.
pub fn session_list_params(
    payment_link_id: &str,
    starting_after: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("payment_link", payment_link_id.to_string()),
        ("limit", SESSION_PAGE_LIMIT.to_string()),
    ];
    if let Some(cursor) = starting_after {
        params.push(("starting_after", cursor.to_string()));
    }
    params
}

#[async_trait]
impl SessionSource for StripeClient {
    async fn list_sessions(
        &self,
        payment_link_id: &str,
        starting_after: Option<&str>,
    ) -> Result<SessionPage> {
        let response = self
            .client
            .get(format!("{}/v1/checkout/sessions", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .query(&session_list_params(payment_link_id, starting_after))
            .send()
            .await
            .map_err(|e| AppError::Stripe(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Stripe(format!("{}: {}", status, error_text)));
        }

        response
            .json::<SessionPage>()
            .await
            .map_err(|e| AppError::Stripe(format!("Failed to parse session list: {}", e)))
    }
}

/// Verifies the `stripe-signature` header of incoming webhooks.
#[derive(Clone)]
pub struct WebhookVerifier {
    webhook_secret: String,
}

impl WebhookVerifier {
    /// Maximum age of a webhook timestamp before it's rejected (in seconds).
    /// Matches the tolerance of Stripe's own libraries.
    const WEBHOOK_TIMESTAMP_TOLERANCE_SECS: i64 = 300;

    /// Allowed clock skew for timestamps from the future.
    const FUTURE_SKEW_SECS: i64 = 60;

    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
        }
    }

    /// Returns `Ok(false)` for a well-formed header whose signature or
    /// timestamp doesn't check out, and an error for a malformed header.
    pub fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> Result<bool> {
        self.verify_at(payload, signature, chrono::Utc::now().timestamp())
    }

    fn verify_at(&self, payload: &[u8], signature: &str, now: i64) -> Result<bool> {
        // Stripe signature format: t=timestamp,v1=signature[,v1=...][,v0=...]
        let mut timestamp = None;
        let mut candidates = Vec::new();

        for part in signature.split(',') {
            if let Some(t) = part.strip_prefix("t=") {
                timestamp = Some(t);
            } else if let Some(s) = part.strip_prefix("v1=") {
                candidates.push(s);
            }
        }

        let timestamp_str =
            timestamp.ok_or_else(|| AppError::BadRequest(msg::INVALID_SIGNATURE_FORMAT.into()))?;
        if candidates.is_empty() {
            return Err(AppError::BadRequest(msg::INVALID_SIGNATURE_FORMAT.into()));
        }

        let timestamp: i64 = timestamp_str
            .parse()
            .map_err(|_| AppError::BadRequest(msg::INVALID_TIMESTAMP_IN_SIGNATURE.into()))?;

        let age = now - timestamp;
        if age > Self::WEBHOOK_TIMESTAMP_TOLERANCE_SECS {
            tracing::warn!(
                "Stripe webhook rejected: timestamp too old (age={}s, max={}s)",
                age,
                Self::WEBHOOK_TIMESTAMP_TOLERANCE_SECS
            );
            return Ok(false);
        }
        if age < -Self::FUTURE_SKEW_SECS {
            tracing::warn!(
                "Stripe webhook rejected: timestamp in the future (age={}s)",
                age
            );
            return Ok(false);
        }

        let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
            .map_err(|_| AppError::Internal(msg::INVALID_WEBHOOK_SECRET.into()))?;
        mac.update(timestamp_str.as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());
        let expected_bytes = expected.as_bytes();

        // Stripe may send several v1 signatures while a secret is being rolled
        Ok(candidates.iter().any(|candidate| {
            let provided = candidate.as_bytes();
            provided.len() == expected_bytes.len() && bool::from(expected_bytes.ct_eq(provided))
        }))
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

/// Envelope of a Stripe webhook event. Only the type matters here: every
/// qualifying event triggers a full resync regardless of its payload.
#[derive(Debug, Deserialize)]
pub struct StripeWebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
}

impl StripeWebhookEvent {
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == CHECKOUT_SESSION_COMPLETED
    }
}
