use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use serde::Serialize;

use crate::error::{AppError, Result, msg};
use crate::payments::StripeWebhookEvent;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

fn extract_signature(headers: &HeaderMap) -> Result<&str> {
    headers
        .get("stripe-signature")
        .ok_or_else(|| AppError::BadRequest(msg::MISSING_SIGNATURE_HEADER.into()))?
        .to_str()
        .map_err(|e| {
            tracing::debug!("Invalid UTF-8 in Stripe signature header: {}", e);
            AppError::BadRequest(msg::INVALID_SIGNATURE_HEADER.into())
        })
}

/// Axum handler for Stripe webhooks.
///
/// A completed checkout triggers a full guest list resync, and the response
/// is only sent once that sync has finished or failed. Other event types
/// are acknowledged without doing anything.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>> {
    let signature = extract_signature(&headers)?;

    if !state.verifier.verify_webhook_signature(&body, signature)? {
        tracing::warn!("Stripe webhook rejected: signature mismatch");
        return Err(AppError::InvalidSignature);
    }

    let event: StripeWebhookEvent = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to parse Stripe webhook: {}", e);
        AppError::BadRequest(msg::INVALID_EVENT_PAYLOAD.into())
    })?;

    if event.is_checkout_completed() {
        tracing::info!(
            "Checkout completed (event {}), resyncing guest list",
            event.id.as_deref().unwrap_or("unknown")
        );
        let report = state.sync.run().await?;
        tracing::info!("Guest list synced: {} guest(s)", report.guests);
    } else {
        tracing::debug!("Ignoring Stripe event type {}", event.event_type);
    }

    Ok(Json(WebhookAck { status: "ok" }))
}
