//! Google Sheets output: service-account auth, the values API client and
//! the guest table writer.

mod auth;
mod client;
mod syncer;

pub use auth::*;
pub use client::*;
pub use syncer::*;

use async_trait::async_trait;

use crate::error::Result;

/// Write access to spreadsheet value ranges.
///
/// `range` is in A1 notation including the sheet name (e.g. `Ark1!A2:Z`).
#[async_trait]
pub trait SheetWriter: Send + Sync {
    /// Overwrites the range row by row with user-entered semantics.
    /// Cells past the supplied rows are left untouched.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<()>;

    /// Clears every value in the range, keeping formatting.
    async fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<()>;
}
