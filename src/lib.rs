//! Afterparty - keeps a Google Sheets guest list in sync with Stripe
//!
//! Every completed checkout on a configured payment link triggers a full
//! recomputation of the guest list from Stripe's checkout history, which is
//! then written over the guest range of the destination sheet.

pub mod config;
pub mod error;
pub mod guests;
pub mod handlers;
pub mod models;
pub mod payments;
pub mod sheets;
pub mod state;
pub mod sync;
pub mod util;

use std::sync::Arc;

use crate::config::Config;
use crate::error::StartupError;
use crate::guests::{GuestListBuilder, SessionFetcher};
use crate::payments::{SessionSource, StripeClient, WebhookVerifier};
use crate::sheets::{
    ServiceAccountAuth, ServiceAccountKey, SheetSyncer, SheetWriter, SheetsClient,
};
use crate::state::AppState;
use crate::sync::GuestSync;
use crate::util::http_client;

/// Wires the sync pipeline and handler state from config and the two
/// external integrations.
pub fn build_state(
    config: &Config,
    sessions: Arc<dyn SessionSource>,
    sheets: Arc<dyn SheetWriter>,
) -> AppState {
    let builder = GuestListBuilder::new(SessionFetcher::new(sessions));
    let syncer = SheetSyncer::new(sheets, config.sheet_name.clone())
        .with_clear_stale_rows(config.clear_stale_rows);

    AppState {
        verifier: WebhookVerifier::new(config.webhook_secret.clone()),
        sync: Arc::new(GuestSync::new(
            builder,
            syncer,
            config.guest_list.payment_links.clone(),
            config.guest_list.spreadsheet_id.clone(),
        )),
    }
}

/// State backed by the real Stripe and Google Sheets APIs. Fails if the
/// service-account key can't be loaded.
pub fn build_live_state(config: &Config) -> Result<AppState, StartupError> {
    let client = http_client()?;

    let key = ServiceAccountKey::from_file(&config.google_credentials_path)?;
    tracing::info!("Using Google service account {}", key.client_email);
    let auth = ServiceAccountAuth::new(client.clone(), key)?;

    let stripe = StripeClient::new(client.clone(), config.stripe_api_key.clone());
    let sheets = SheetsClient::new(client, Arc::new(auth));

    Ok(build_state(config, Arc::new(stripe), Arc::new(sheets)))
}
