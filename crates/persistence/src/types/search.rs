//! Free-text search query.
//!
//! A [`SearchQuery`] matches a document when any of its named fields holds a
//! string that contains the query text, ignoring case. The text is always
//! matched literally.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::NAME_FIELD;

/// Default cap on the number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A case-insensitive substring search over named fields.
///
/// # Examples
///
/// ```
/// use roster_persistence::types::SearchQuery;
///
/// let query = SearchQuery::parse(Some("ali"), Some("name, email,")).unwrap();
/// assert_eq!(query.fields(), ["name", "email"]);
///
/// assert!(SearchQuery::parse(Some("  "), Some("name")).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
    fields: Vec<String>,
    limit: usize,
}

impl SearchQuery {
    /// Parses raw query values.
    ///
    /// Returns `None` when the text is absent or only whitespace. Otherwise the
    /// text is kept exactly as given. Field entries are trimmed; names that are
    /// empty, have an empty dotted segment, contain control characters, or
    /// have a segment starting with `$` are dropped. If no field remains,
    /// `name` is searched.
    pub fn parse(text: Option<&str>, fields: Option<&str>) -> Option<Self> {
        let text = text?;
        if text.trim().is_empty() {
            return None;
        }

        let mut names: Vec<String> = Vec::new();
        for name in fields.unwrap_or_default().split(',').map(str::trim) {
            if is_searchable_field(name) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            names.push(NAME_FIELD.to_string());
        }

        Some(Self {
            text: text.to_string(),
            fields: names,
            limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Sets the result cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Returns the text to look for.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the fields to search.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the result cap.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the text as a regular expression that matches it literally.
    pub fn escaped_pattern(&self) -> String {
        regex::escape(&self.text)
    }
}

/// Returns `true` if the dotted `field` of `document` holds a string
/// containing `text`, ignoring case.
///
/// Arrays along the path are searched element by element. Missing fields and
/// non-string values never match.
pub fn field_contains(document: &Value, field: &str, text: &str) -> bool {
    let needle = text.to_lowercase();
    let segments: Vec<&str> = field.split('.').collect();
    value_contains(document, &segments, &needle)
}

fn value_contains(value: &Value, segments: &[&str], needle: &str) -> bool {
    match (value, segments.split_first()) {
        (Value::Array(items), _) => items
            .iter()
            .any(|item| value_contains(item, segments, needle)),
        (Value::String(s), None) => s.to_lowercase().contains(needle),
        (Value::Object(map), Some((head, rest))) => map
            .get(*head)
            .is_some_and(|child| value_contains(child, rest, needle)),
        _ => false,
    }
}

fn is_searchable_field(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(char::is_control)
        && name
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.starts_with('$'))
}
