use serde::{Deserialize, Serialize};

/// A Stripe payment link and the guest category it sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLinkConfig {
    /// Stripe payment link id (plink_xxx)
    pub id: String,
    /// Category shown in the guest list (e.g., "VIP")
    pub name: String,
}

impl PaymentLinkConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The configured payment links, in configuration order.
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentLinkCatalog {
    links: Vec<PaymentLinkConfig>,
}

impl PaymentLinkCatalog {
    pub fn new(links: Vec<PaymentLinkConfig>) -> Self {
        Self { links }
    }

    /// Exact-id lookup.
    pub fn lookup(&self, payment_link_id: &str) -> Option<&PaymentLinkConfig> {
        self.links.iter().find(|link| link.id == payment_link_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentLinkConfig> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns the first id that appears more than once, if any.
    pub fn find_duplicate_id(&self) -> Option<&str> {
        self.links.iter().enumerate().find_map(|(i, link)| {
            self.links[..i]
                .iter()
                .any(|earlier| earlier.id == link.id)
                .then_some(link.id.as_str())
        })
    }
}

impl From<Vec<PaymentLinkConfig>> for PaymentLinkCatalog {
    fn from(links: Vec<PaymentLinkConfig>) -> Self {
        Self::new(links)
    }
}
