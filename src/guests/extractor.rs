use crate::error::{AppError, Result};
use crate::models::{CheckoutSession, GuestRecord, PaymentLinkCatalog};

/// Turns a checkout session into a guest record.
///
/// Returns `Ok(None)` for sessions that aren't completed payments with
/// customer details. A session whose payment link isn't in the catalog is
/// an error: there is no fallback category.
pub fn extract_guest(
    session: &CheckoutSession,
    catalog: &PaymentLinkCatalog,
) -> Result<Option<GuestRecord>> {
    if !session.is_eligible() {
        return Ok(None);
    }
    let Some(details) = session.customer_details.as_ref() else {
        return Ok(None);
    };

    let link = session
        .payment_link
        .as_deref()
        .and_then(|id| catalog.lookup(id))
        .ok_or_else(|| AppError::CategoryLookup {
            session_id: session.id.clone(),
            payment_link_id: session.payment_link.clone(),
        })?;

    Ok(Some(GuestRecord::new(
        details.name.as_deref(),
        details.email.as_deref(),
        &link.name,
    )))
}
