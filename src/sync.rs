//! One guest list sync run: rebuild from Stripe, then overwrite the sheet.

use tokio::sync::Mutex;

use crate::error::Result;
use crate::guests::GuestListBuilder;
use crate::models::PaymentLinkCatalog;
use crate::sheets::SheetSyncer;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub guests: usize,
}

pub struct GuestSync {
    builder: GuestListBuilder,
    syncer: SheetSyncer,
    catalog: PaymentLinkCatalog,
    spreadsheet_id: String,
    // Held for a whole run so overlapping webhooks can't interleave a stale
    // read with a newer write.
    running: Mutex<()>,
}

impl GuestSync {
    pub fn new(
        builder: GuestListBuilder,
        syncer: SheetSyncer,
        catalog: PaymentLinkCatalog,
        spreadsheet_id: impl Into<String>,
    ) -> Self {
        Self {
            builder,
            syncer,
            catalog,
            spreadsheet_id: spreadsheet_id.into(),
            running: Mutex::new(()),
        }
    }

    /// Recomputes the full guest list and writes it. Nothing is written if
    /// the build fails.
    pub async fn run(&self) -> Result<SyncReport> {
        let _guard = self.running.lock().await;

        let table = self.builder.build(&self.catalog).await?;
        self.syncer.sync(&self.spreadsheet_id, &table).await?;

        Ok(SyncReport {
            guests: table.len(),
        })
    }
}
