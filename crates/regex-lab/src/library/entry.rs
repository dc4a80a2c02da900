//! Pattern library entries and their provenance.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix carried by every user-created id.
pub const USER_ID_PREFIX: &str = "custom-";

/// Category used for entries without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Category given to user entries created without one.
pub const USER_CATEGORY: &str = "Custom";

/// Identifier of a library entry, tagged with where the entry came from.
///
/// Only [`PatternId::User`] entries can be edited or deleted. On the wire an
/// id is a plain string; user ids start with [`USER_ID_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternId {
    /// Shipped with the library. Read-only.
    BuiltIn(String),
    /// Created at runtime. The string includes the user prefix.
    User(String),
}

impl PatternId {
    /// Classify a raw id string.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.starts_with(USER_ID_PREFIX) {
            Self::User(raw)
        } else {
            Self::BuiltIn(raw)
        }
    }

    /// A built-in id.
    #[must_use]
    pub fn builtin(raw: impl Into<String>) -> Self {
        Self::BuiltIn(raw.into())
    }

    /// The id as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BuiltIn(s) | Self::User(s) => s,
        }
    }

    /// Check if the entry is user-owned.
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PatternId {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for PatternId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PatternId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::parse)
    }
}

/// A named, described pattern in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    /// Identifier and provenance.
    pub id: PatternId,
    /// Display name.
    pub name: String,
    /// Pattern source.
    pub pattern: String,
    /// What the pattern matches.
    #[serde(default)]
    pub description: String,
    /// Grouping category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl PatternEntry {
    /// The category, defaulting to [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Case-insensitive substring search over name, description, pattern and category.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_query(&self, needle: &str) -> bool {
        [
            self.name.as_str(),
            self.description.as_str(),
            self.pattern.as_str(),
            self.category(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    pub(crate) fn apply(&mut self, fields: PatternFields) {
        self.name = fields.name;
        self.pattern = fields.pattern;
        self.description = fields.description;
        self.category = fields.category.filter(|c| !c.is_empty());
    }
}

/// The editable fields of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFields {
    /// Display name. Must not be empty.
    pub name: String,
    /// Pattern source. Must not be empty.
    pub pattern: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Category; empty or missing means the default for the operation.
    #[serde(default)]
    pub category: Option<String>,
}

impl PatternFields {
    /// Fields with a name and pattern.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Check that name and pattern are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.pattern.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_classify_by_prefix() {
        assert!(PatternId::parse("custom-17-ab").is_user());
        assert!(!PatternId::parse("email").is_user());
    }

    #[test]
    fn ids_serialize_as_strings() {
        let json = serde_json::to_string(&PatternId::parse("custom-1")).unwrap();
        assert_eq!(json, "\"custom-1\"");
        let id: PatternId = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(id, PatternId::builtin("email"));
    }

    #[test]
    fn missing_category_falls_back() {
        let entry: PatternEntry =
            serde_json::from_str(r#"{"id":"x","name":"X","pattern":"x"}"#).unwrap();
        assert_eq!(entry.category(), DEFAULT_CATEGORY);
        assert_eq!(entry.description, "");
    }

    #[test]
    fn query_checks_every_field() {
        let entry = PatternEntry {
            id: PatternId::builtin("zip"),
            name: "ZIP Code".into(),
            pattern: r"\d{5}".into(),
            description: "US postal code".into(),
            category: Some("Numbers".into()),
        };
        assert!(entry.matches_query("zip"));
        assert!(entry.matches_query("postal"));
        assert!(entry.matches_query(r"\d{5}"));
        assert!(entry.matches_query("numb"));
        assert!(!entry.matches_query("email"));
    }
}
