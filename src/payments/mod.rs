mod stripe;

pub use stripe::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::SessionPage;

/// Largest page the checkout session list endpoint will return.
pub const SESSION_PAGE_LIMIT: u32 = 100;

/// Source of checkout session pages for a payment link.
///
/// `starting_after` is the id of the last session of the previous page.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn list_sessions(
        &self,
        payment_link_id: &str,
        starting_after: Option<&str>,
    ) -> Result<SessionPage>;
}
