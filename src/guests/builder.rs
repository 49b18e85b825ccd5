use crate::error::Result;
use crate::models::{GuestTable, PaymentLinkCatalog};

use super::{SessionFetcher, extract_guest};

/// Builds the full guest table across every configured payment link.
#[derive(Clone)]
pub struct GuestListBuilder {
    fetcher: SessionFetcher,
}

impl GuestListBuilder {
    pub fn new(fetcher: SessionFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches links in catalog order, extracts a guest from every session
    /// and sorts by name. The first session with an unknown payment link
    /// aborts the whole build.
    pub async fn build(&self, catalog: &PaymentLinkCatalog) -> Result<GuestTable> {
        let mut sessions = Vec::new();
        for link in catalog.iter() {
            let fetched = self.fetcher.fetch(&link.id).await?;
            tracing::info!("{} ({}): {} paid checkouts", link.name, link.id, fetched.len());
            sessions.extend(fetched);
        }

        let mut records = Vec::with_capacity(sessions.len());
        for session in &sessions {
            if let Some(record) = extract_guest(session, catalog)? {
                records.push(record);
            }
        }

        Ok(GuestTable::from_records(records))
    }
}
