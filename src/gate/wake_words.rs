//! Wake-word list parsing
//!
//! The configuration surface accepts either a comma-separated string
//! (Latin `,` or Chinese `，`) or a list of strings. Entries are trimmed,
//! empties dropped, duplicates collapsed. Insertion order is preserved so
//! the first-match scan in the gate is deterministic.

use serde_json::Value;

/// Latin and Chinese comma
const SEPARATORS: &[char] = &[',', '，'];

/// Ordered, deduplicated set of wake words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WakeWords(Vec<String>);

impl WakeWords {
    /// Parse from a config value: a string, a list of strings, or anything
    /// else (which yields an empty set).
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from_parts(s.split(SEPARATORS)),
            Value::Array(items) => {
                Self::from_parts(items.iter().filter_map(|v| v.as_str()))
            }
            _ => Self::default(),
        }
    }

    fn from_parts<'a>(parts: impl Iterator<Item = &'a str>) -> Self {
        let mut words = Vec::new();
        for part in parts {
            let word = part.trim();
            if word.is_empty() || words.iter().any(|w| w == word) {
                continue;
            }
            words.push(word.to_string());
        }
        Self(words)
    }

    /// Find the first configured word contained in `text`
    pub fn first_match<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.0
            .iter()
            .find(|word| text.contains(word.as_str()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for WakeWords {
    fn from(s: &str) -> Self {
        Self::from_parts(s.split(SEPARATORS))
    }
}
