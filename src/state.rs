use std::sync::Arc;

use crate::payments::WebhookVerifier;
use crate::sync::GuestSync;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub verifier: WebhookVerifier,
    pub sync: Arc<GuestSync>,
}
