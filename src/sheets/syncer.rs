use std::sync::Arc;

use crate::error::Result;
use crate::models::GuestTable;

use super::SheetWriter;

/// Guest rows start below the header row and may use any column.
pub const GUEST_RANGE: &str = "A2:Z";

const FIRST_GUEST_ROW: usize = 2;

/// The part of the guest range below a list of `rows` guests.
pub fn stale_range(rows: usize) -> String {
    format!("A{}:Z", FIRST_GUEST_ROW + rows)
}

/// Writes guest tables to a fixed tab of the destination spreadsheet.
#[derive(Clone)]
pub struct SheetSyncer {
    writer: Arc<dyn SheetWriter>,
    sheet_name: String,
    clear_stale_rows: bool,
}

impl SheetSyncer {
    pub fn new(writer: Arc<dyn SheetWriter>, sheet_name: impl Into<String>) -> Self {
        Self {
            writer,
            sheet_name: sheet_name.into(),
            clear_stale_rows: false,
        }
    }

    /// When enabled, rows below the freshly written list are cleared after
    /// every successful write so leftovers from a longer list disappear.
    pub fn with_clear_stale_rows(mut self, clear: bool) -> Self {
        self.clear_stale_rows = clear;
        self
    }

    /// `range` qualified with the sheet name, quoting names that A1
    /// notation can't take bare.
    pub fn qualified_range(&self, range: &str) -> String {
        let bare = !self.sheet_name.is_empty()
            && self
                .sheet_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if bare {
            format!("{}!{}", self.sheet_name, range)
        } else {
            format!("'{}'!{}", self.sheet_name.replace('\'', "''"), range)
        }
    }

    /// Overwrites the guest range with `table`. The optional clear only runs
    /// once the write has succeeded, so a failed write leaves the old rows.
    pub async fn sync(&self, spreadsheet_id: &str, table: &GuestTable) -> Result<()> {
        let range = self.qualified_range(GUEST_RANGE);

        self.writer
            .update_values(spreadsheet_id, &range, &table.to_rows())
            .await?;
        tracing::info!("Wrote {} guest row(s) to {}", table.len(), range);

        if self.clear_stale_rows {
            let stale = self.qualified_range(&stale_range(table.len()));
            self.writer.clear_values(spreadsheet_id, &stale).await?;
            tracing::debug!("Cleared stale rows in {}", stale);
        }

        Ok(())
    }
}
