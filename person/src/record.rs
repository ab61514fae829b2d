//! Flat-file line format.
//!
//! One record per line, four comma-separated fields:
//!
//! ```text
//! lastName, firstName, <5-digit zip> <city>, colorCode
//! ```
//!
//! Lines with fewer than four parts are skipped. The fourth part swallows any
//! further commas. Field-level problems never reject a line: an unmatched
//! zip/city becomes a bare city and an unknown color code becomes `None`.

use crate::{ColorTable, Person};
use regex::Regex;
use std::sync::Arc;

/// Number of comma-separated parts a record line must have.
pub const FIELD_COUNT: usize = 4;

const ZIP_CITY_PATTERN: &str = r"^(\d{5})\s+(.*)$";
const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid zip/city pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Parses and renders record lines against a fixed color table.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    colors: Arc<ColorTable>,
    zip_city: Regex,
}

impl RecordCodec {
    pub fn new(colors: Arc<ColorTable>) -> Result<Self, CodecError> {
        Ok(Self {
            colors,
            zip_city: Regex::new(ZIP_CITY_PATTERN)?,
        })
    }

    /// Parse a whole file. Accepted lines get ids `1, 2, 3, ...` in file
    /// order; skipped lines do not consume an id.
    pub fn parse_document(&self, text: &str) -> Vec<Person> {
        let mut people: Vec<Person> = Vec::new();
        for raw in text.lines() {
            if let Some(person) = self.parse_line(raw) {
                let id = people.len() as i64 + 1;
                people.push(person.with_id(id));
            }
        }
        people
    }

    /// Parse a single line into a record with `id == 0`.
    ///
    /// Returns `None` when the line has fewer than [`FIELD_COUNT`] parts.
    pub fn parse_line(&self, raw: &str) -> Option<Person> {
        let line = raw.trim_start_matches(BYTE_ORDER_MARK);
        let parts: Vec<&str> = line.splitn(FIELD_COUNT, ',').collect();
        if parts.len() < FIELD_COUNT {
            return None;
        }

        let (zip_code, city) = self.parse_zip_city(parts[2].trim());
        Some(Person {
            id: 0,
            last_name: Some(parts[0].trim().to_string()),
            first_name: Some(parts[1].trim().to_string()),
            zip_code,
            city,
            color: self.resolve_color(parts[3].trim()),
        })
    }

    /// Split `"12345 Berlin"` into zip and city.
    ///
    /// Without a leading five-digit code the whole value is the city.
    pub fn parse_zip_city(&self, raw: &str) -> (Option<String>, Option<String>) {
        if raw.trim().is_empty() {
            return (None, None);
        }
        match self.zip_city.captures(raw) {
            Some(caps) => (
                caps.get(1).map(|m| m.as_str().to_string()),
                caps.get(2).map(|m| m.as_str().to_string()),
            ),
            None => (None, Some(raw.to_string())),
        }
    }

    /// Resolve the color field.
    ///
    /// Integers go through the color table (`None` if unknown); anything
    /// else is taken as the color name itself.
    pub fn resolve_color(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }
        match raw.parse::<i32>() {
            Ok(code) => self.colors.name_for(code).map(str::to_string),
            Err(_) => Some(raw.to_string()),
        }
    }

    /// Render a record as a file line, without a line terminator.
    ///
    /// Absent fields render as empty strings, so a record without a zip code
    /// produces `" city"` in the third column.
    pub fn format_line(&self, person: &Person) -> String {
        format!(
            "{}, {}, {} {}, {}",
            person.last_name.as_deref().unwrap_or_default(),
            person.first_name.as_deref().unwrap_or_default(),
            person.zip_code.as_deref().unwrap_or_default(),
            person.city.as_deref().unwrap_or_default(),
            self.colors.code_for(person.color.as_deref()),
        )
    }
}
