//! Mapping from numeric color codes to color names.
//!
//! The flat file stores colors as small integers; everything above the file
//! layer works with names. The table keeps entries in the order they were
//! supplied because reverse lookups pick the first matching entry.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// Code used when a color name has no entry in the table.
pub const UNKNOWN_COLOR_CODE: i32 = 0;

/// Ordered, read-only color code table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<(i32, String)>,
}

impl ColorTable {
    pub fn new(entries: Vec<(i32, String)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.entries.iter().map(|(code, name)| (*code, name.as_str()))
    }

    /// Look up the color name for `code`.
    pub fn name_for(&self, code: i32) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| name.as_str())
    }

    /// Reverse lookup used when writing a record back to the file.
    ///
    /// Exact, case-sensitive comparison; the first entry in table order wins.
    /// Returns [`UNKNOWN_COLOR_CODE`] when nothing matches or `name` is `None`.
    pub fn code_for(&self, name: Option<&str>) -> i32 {
        let Some(name) = name else {
            return UNKNOWN_COLOR_CODE;
        };
        self.entries
            .iter()
            .find(|(_, n)| n == name)
            .map(|(code, _)| *code)
            .unwrap_or(UNKNOWN_COLOR_CODE)
    }
}

impl FromIterator<(i32, String)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (i32, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for ColorTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ColorTableVisitor)
    }
}

/// Reads a `{"1": "blau", "2": "grün"}` object in document order.
struct ColorTableVisitor;

impl<'de> Visitor<'de> for ColorTableVisitor {
    type Value = ColorTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of integer color codes to color names")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((code, name)) = map.next_entry::<i32, String>()? {
            entries.push((code, name));
        }
        Ok(ColorTable::new(entries))
    }
}
