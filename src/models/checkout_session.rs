use serde::{Deserialize, Serialize};

/// Checkout session mode. Only one-off payments produce guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Payment,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Complete,
    #[serde(other)]
    Other,
}

/// Name and email entered by the customer during checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Subset of a Stripe checkout session as returned by the list endpoint.
/// Read-only snapshot; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub mode: SessionMode,
    /// Null for sessions Stripe has not finalized
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default)]
    pub payment_link: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
}

impl CheckoutSession {
    /// A paid, completed one-off checkout with customer details attached.
    pub fn is_eligible(&self) -> bool {
        self.mode == SessionMode::Payment
            && self.status == Some(SessionStatus::Complete)
            && self.customer_details.is_some()
    }
}

/// One page of the checkout session list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionPage {
    pub data: Vec<CheckoutSession>,
    pub has_more: bool,
}
