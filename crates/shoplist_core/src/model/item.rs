//! List item domain model.
//!
//! # Responsibility
//! - Define the canonical text record shared by rendered rows and storage.
//! - Provide the case-insensitive key used for duplicate detection.
//!
//! # Invariants
//! - Item text is never empty.
//! - Items built from input are trimmed; stored text is kept as found, so an
//!   older whitespace-only entry still loads.
//! - Two items are duplicates when their lowercase forms are equal.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One shopping-list entry, identified only by its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Item(String);

/// Validation errors for item text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Text is empty after trimming surrounding whitespace.
    EmptyText,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "item text cannot be empty"),
        }
    }
}

impl Error for ItemValidationError {}

impl Item {
    /// Parses raw input-field text into an item.
    ///
    /// Surrounding whitespace is trimmed before validation, so `"  milk "`
    /// becomes `"milk"` and `"   "` is rejected.
    pub fn parse(raw: &str) -> Result<Self, ItemValidationError> {
        Self::try_from(raw.trim().to_string())
    }

    /// Returns the exact item text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the lowercase comparison key.
    pub fn key(&self) -> String {
        fold_case(self.0.as_str())
    }

    /// Returns whether `other` names the same item ignoring case.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.key() == fold_case(other)
    }

    /// Returns whether the item text contains `needle` ignoring case.
    ///
    /// An empty needle matches every item.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.key().contains(fold_case(needle).as_str())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Item {
    type Error = ItemValidationError;

    /// Accepts any non-empty text without trimming it.
    ///
    /// Used by the storage read path so persisted text is kept byte-exact.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ItemValidationError::EmptyText);
        }
        Ok(Self(value))
    }
}

impl From<Item> for String {
    fn from(value: Item) -> Self {
        value.0
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemValidationError};

    #[test]
    fn parse_trims_and_rejects_blank_text() {
        assert_eq!(Item::parse("  Milk ").unwrap().as_str(), "Milk");
        assert_eq!(Item::parse("").unwrap_err(), ItemValidationError::EmptyText);
        assert_eq!(Item::parse(" \t ").unwrap_err(), ItemValidationError::EmptyText);
    }

    #[test]
    fn duplicate_check_ignores_case() {
        let item = Item::parse("Milk").unwrap();
        assert!(item.matches_ignore_case("milk"));
        assert!(item.matches_ignore_case("MILK"));
        assert!(!item.matches_ignore_case("milky"));
    }

    #[test]
    fn substring_match_ignores_case_and_empty_matches_all() {
        let item = Item::parse("Oat Milk").unwrap();
        assert!(item.contains_ignore_case("MILK"));
        assert!(item.contains_ignore_case(""));
        assert!(!item.contains_ignore_case("soy"));
    }

    #[test]
    fn serde_uses_plain_string_and_rejects_empty_entries() {
        let item = Item::parse("Eggs").unwrap();
        assert_eq!(serde_json::to_string(&item).unwrap(), "\"Eggs\"");

        let parsed: Item = serde_json::from_str("\" padded \"").unwrap();
        assert_eq!(parsed.as_str(), " padded ");
        let blank: Item = serde_json::from_str("\"  \"").unwrap();
        assert_eq!(blank.as_str(), "  ");

        assert!(serde_json::from_str::<Item>("\"\"").is_err());
    }
}
