use serde::{Serialize, Serializer, ser::SerializeSeq};

/// Placeholder written when Stripe has no name or email for a guest.
pub const MISSING_FIELD: &str = "NA";

/// One row of the guest list: name, email, category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRecord {
    pub name: String,
    pub email: String,
    pub category: String,
}

impl GuestRecord {
    pub fn new(name: Option<&str>, email: Option<&str>, category: &str) -> Self {
        Self {
            name: name.unwrap_or(MISSING_FIELD).to_string(),
            email: email.unwrap_or(MISSING_FIELD).to_string(),
            category: category.to_string(),
        }
    }

    /// Cell values in sheet column order (A, B, C).
    pub fn to_row(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.category.clone()]
    }
}

// Rows go to the Sheets API as plain string arrays, not objects.
impl Serialize for GuestRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.name)?;
        seq.serialize_element(&self.email)?;
        seq.serialize_element(&self.category)?;
        seq.end()
    }
}

/// Guest records sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuestTable {
    records: Vec<GuestRecord>,
}

impl GuestTable {
    /// Sorts ascending by name. The sort is stable, so guests sharing a name
    /// keep their fetch order.
    pub fn from_records(mut records: Vec<GuestRecord>) -> Self {
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Self { records }
    }

    pub fn records(&self) -> &[GuestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(GuestRecord::to_row).collect()
    }
}
