//! Derived string properties

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::digest::content_digest;

/// The full set of properties derived from a normalized value.
///
/// Every field is a pure function of the value it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of characters (Unicode scalar values)
    pub length: usize,

    /// True iff the value reads identically reversed
    pub is_palindrome: bool,

    /// Number of distinct characters
    pub unique_characters: usize,

    /// Number of whitespace-delimited tokens
    pub word_count: usize,

    /// SHA-256 hex digest of the value (same as the record id)
    pub content_hash: String,

    /// Occurrences per distinct character, keyed by the character
    pub character_frequency: BTreeMap<String, usize>,
}

/// Case-folds a raw string into its normalized form.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
}

/// Derives all properties for an already-normalized value.
///
/// Total: any string, including the empty string, is valid input.
pub fn derive(value: &str) -> StringProperties {
    let mut character_frequency: BTreeMap<String, usize> = BTreeMap::new();
    for c in value.chars() {
        *character_frequency.entry(c.to_string()).or_insert(0) += 1;
    }

    let unique_characters = value.chars().collect::<HashSet<_>>().len();

    StringProperties {
        length: value.chars().count(),
        is_palindrome: value.chars().eq(value.chars().rev()),
        unique_characters,
        word_count: value.split_whitespace().count(),
        content_hash: content_digest(value),
        character_frequency,
    }
}
