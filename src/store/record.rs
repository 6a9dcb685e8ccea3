//! String record format

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{content_digest, derive, normalize, StringProperties};

/// One stored string plus its derived properties.
///
/// Records are never updated in place. `id` and `properties` are pure
/// functions of `value`; only `created_at` depends on when it was inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Normalizes `raw` and derives a complete record for it.
    pub fn new(raw: &str, created_at: DateTime<Utc>) -> Self {
        let value = normalize(raw);
        let properties = derive(&value);
        Self {
            id: content_digest(&value),
            value,
            properties,
            created_at,
        }
    }

    /// True if `id` and `properties` agree with a fresh derivation of `value`.
    pub fn is_consistent(&self) -> bool {
        self.value == normalize(&self.value)
            && self.id == content_digest(&self.value)
            && self.properties == derive(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_value() {
        let record = StringRecord::new("Racecar", Utc::now());
        assert_eq!(record.value, "racecar");
        assert_eq!(record.id, content_digest("racecar"));
        assert_eq!(record.properties.content_hash, record.id);
    }

    #[test]
    fn test_id_independent_of_casing() {
        let now = Utc::now();
        let a = StringRecord::new("HELLO World", now);
        let b = StringRecord::new("hello world", now);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_consistency_check() {
        let mut record = StringRecord::new("apple", Utc::now());
        assert!(record.is_consistent());

        record.properties.length = 99;
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_serialized_field_names() {
        let record = StringRecord::new("zebra", Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["value"], "zebra");
        assert_eq!(json["properties"]["length"], 5);
        assert_eq!(json["properties"]["is_palindrome"], false);
        assert_eq!(json["properties"]["character_frequency"]["z"], 1);
        assert!(json["created_at"].is_string());
    }
}
