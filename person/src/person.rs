use serde::{Deserialize, Serialize};

/// A single person record.
///
/// Every field except `id` is optional: the repositories accept whatever the
/// caller hands them, and the flat-file parser degrades malformed fields to
/// `None` instead of rejecting the line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Backend-assigned identifier. `0` means "not yet persisted".
    #[serde(default)]
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    /// Resolved color name, never the numeric code.
    pub color: Option<String>,
}

impl Person {
    /// Return a copy of this record carrying `id`.
    pub fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }

    /// Case-insensitive exact match on the resolved color name.
    ///
    /// A person without a color never matches, and neither does a blank query.
    pub fn has_color(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        match self.color.as_deref() {
            Some(color) => color.to_lowercase() == name.to_lowercase(),
            None => false,
        }
    }

    /// Same record ignoring the identifier.
    pub fn same_fields(&self, other: &Person) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.zip_code == other.zip_code
            && self.city == other.city
            && self.color == other.color
    }
}
