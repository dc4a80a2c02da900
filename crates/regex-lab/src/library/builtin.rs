//! The shipped, read-only pattern set.

use std::sync::LazyLock;

use super::entry::{PatternEntry, PatternId};

static BUILTINS: LazyLock<Vec<PatternEntry>> = LazyLock::new(|| {
    [
        (
            "email",
            "Email Address",
            r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            "Common email address format",
            "Validation",
        ),
        (
            "url",
            "URL",
            r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
            "HTTP and HTTPS links",
            "Web",
        ),
        (
            "ipv4",
            "IPv4 Address",
            r"\b(?:(?:25[0-5]|2[0-4]\d|1?\d?\d)\.){3}(?:25[0-5]|2[0-4]\d|1?\d?\d)\b",
            "Dotted-quad IPv4 address",
            "Web",
        ),
        (
            "hex-color",
            "Hex Color",
            r"#(?:[0-9a-fA-F]{3}){1,2}\b",
            "CSS hex color like #fff or #1a2b3c",
            "Web",
        ),
        (
            "slug",
            "URL Slug",
            r"^[a-z0-9]+(?:-[a-z0-9]+)*$",
            "Lowercase words joined by hyphens",
            "Web",
        ),
        (
            "phone-us",
            "US Phone Number",
            r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
            "Ten-digit US phone number with optional separators",
            "Validation",
        ),
        (
            "zip-us",
            "US ZIP Code",
            r"\b\d{5}(?:-\d{4})?\b",
            "Five-digit ZIP with optional +4",
            "Validation",
        ),
        (
            "password-strong",
            "Strong Password",
            r"^[A-Za-z\d@$!%*?&]{8,}$",
            "At least eight letters, digits or symbols",
            "Validation",
        ),
        (
            "date-iso",
            "ISO Date",
            r"\d{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12]\d|3[01])",
            "Date in YYYY-MM-DD form",
            "Dates",
        ),
        (
            "date-us",
            "US Date",
            r"(?:0[1-9]|1[0-2])/(?:0[1-9]|[12]\d|3[01])/\d{4}",
            "Date in MM/DD/YYYY form",
            "Dates",
        ),
        (
            "time-24h",
            "24-hour Time",
            r"\b(?:[01]\d|2[0-3]):[0-5]\d(?::[0-5]\d)?\b",
            "HH:MM with optional seconds",
            "Dates",
        ),
        (
            "integer",
            "Integer",
            r"-?\d+",
            "Optionally signed whole number",
            "Numbers",
        ),
        (
            "decimal",
            "Decimal Number",
            r"-?\d+(?:\.\d+)?",
            "Number with optional fraction",
            "Numbers",
        ),
        (
            "currency-usd",
            "US Dollar Amount",
            r"\$\d{1,3}(?:,\d{3})*(?:\.\d{2})?",
            "Dollar amount with thousands separators",
            "Numbers",
        ),
        (
            "word-pair",
            "Word Pair",
            r"\b(\w+)\s+(\w+)\b",
            "Two adjacent words, each captured",
            "Text",
        ),
        (
            "whitespace-trailing",
            "Trailing Whitespace",
            r"[ \t]+$",
            "Spaces or tabs at line end (use with multiline)",
            "Text",
        ),
        (
            "html-tag",
            "HTML Tag",
            r"<([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>",
            "Opening HTML tag, capturing the tag name",
            "Text",
        ),
        (
            "uuid",
            "UUID",
            r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
            "Hyphenated UUID",
            "Identifiers",
        ),
    ]
    .into_iter()
    .map(|(id, name, pattern, description, category)| PatternEntry {
        id: PatternId::builtin(id),
        name: name.to_string(),
        pattern: pattern.to_string(),
        description: description.to_string(),
        category: Some(category.to_string()),
    })
    .collect()
});

/// The built-in entries, in display order.
#[must_use]
pub fn builtin_patterns() -> &'static [PatternEntry] {
    &BUILTINS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MatchEngine;
    use crate::flags::FlagSet;
    use std::collections::HashSet;

    #[test]
    fn builtin_ids_are_unique_and_not_user_owned() {
        let mut seen = HashSet::new();
        for entry in builtin_patterns() {
            assert!(!entry.id.is_user(), "{} looks user-owned", entry.id);
            assert!(seen.insert(entry.id.as_str()), "duplicate id {}", entry.id);
        }
    }

    #[test]
    fn builtin_patterns_compile() {
        let engine = MatchEngine::default();
        for entry in builtin_patterns() {
            assert!(
                engine.validate(&entry.pattern, FlagSet::decode("g")).is_ok(),
                "{} failed to compile",
                entry.id
            );
        }
    }
}
