//! Guest list construction from Stripe checkout history.
//!
//! The pipeline is fetch (per payment link, paginated) -> extract (per
//! session) -> sort. Every run recomputes the whole list from Stripe.

mod builder;
mod extractor;
mod fetcher;

pub use builder::GuestListBuilder;
pub use extractor::extract_guest;
pub use fetcher::SessionFetcher;
