//! Recipient list validation.
//!
//! A recipient list is a comma-separated string. Blank segments (leading,
//! trailing or doubled commas) are ignored, so an empty list is valid.

use std::sync::LazyLock;

use regex::Regex;

/// One `@`, no whitespace, and a dot with text on both sides in the domain.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern is valid")
});

/// Verdict for one recipient list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub valid: bool,
    /// Segments that failed the shape test, in the order they appeared.
    pub invalid_entries: Vec<String>,
}

impl ValidationResult {
    fn from_invalid(invalid_entries: Vec<String>) -> Self {
        Self {
            valid: invalid_entries.is_empty(),
            invalid_entries,
        }
    }
}

/// Non-empty trimmed segments of a comma-separated list.
pub fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Shape test for a single, already-trimmed address.
pub fn is_email_shaped(candidate: &str) -> bool {
    EMAIL_SHAPE.is_match(candidate)
}

/// Validate a raw recipient list.
pub fn validate(raw: &str) -> ValidationResult {
    let invalid = segments(raw)
        .filter(|s| !is_email_shaped(s))
        .map(str::to_string)
        .collect();
    ValidationResult::from_invalid(invalid)
}
