use std::sync::Arc;

use crate::error::Result;
use crate::models::CheckoutSession;
use crate::payments::SessionSource;

/// Collects every eligible checkout session of a payment link.
#[derive(Clone)]
pub struct SessionFetcher {
    source: Arc<dyn SessionSource>,
}

impl SessionFetcher {
    pub fn new(source: Arc<dyn SessionSource>) -> Self {
        Self { source }
    }

    /// Walks all pages for `payment_link_id`, then keeps only completed
    /// payment-mode sessions with customer details. Pages are requested one
    /// at a time since each cursor comes from the previous page.
    pub async fn fetch(&self, payment_link_id: &str) -> Result<Vec<CheckoutSession>> {
        let mut sessions = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;

        loop {
            let mut page = self
                .source
                .list_sessions(payment_link_id, cursor.as_deref())
                .await?;
            pages += 1;

            let last_id = page.data.last().map(|session| session.id.clone());
            sessions.append(&mut page.data);

            if !page.has_more {
                break;
            }
            match last_id {
                Some(id) => cursor = Some(id),
                None => {
                    tracing::warn!(
                        "Stripe reported more sessions for {} but sent an empty page, stopping",
                        payment_link_id
                    );
                    break;
                }
            }
        }

        let total = sessions.len();
        sessions.retain(CheckoutSession::is_eligible);

        tracing::debug!(
            "Fetched {} sessions ({} eligible) for {} in {} page(s)",
            total,
            sessions.len(),
            payment_link_id,
            pages
        );

        Ok(sessions)
    }
}
