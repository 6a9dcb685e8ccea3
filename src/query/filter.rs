//! # Filter Predicates
//!
//! Typed predicates over string records. Predicates from different
//! families combine with AND; `ContainsAny` is an OR over its needles.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::store::StringRecord;

/// Query parameter names, one per predicate family
pub const IS_PALINDROME: &str = "is_palindrome";
pub const MIN_LENGTH: &str = "min_length";
pub const MAX_LENGTH: &str = "max_length";
pub const WORD_COUNT: &str = "word_count";
pub const CONTAINS_CHARACTER: &str = "contains_character";

/// A single typed predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Palindrome flag equals
    IsPalindrome(bool),

    /// Length at least
    MinLength(usize),

    /// Length at most
    MaxLength(usize),

    /// Word count equals (exact, not ranged)
    WordCount(usize),

    /// Value contains at least one of the needles
    ContainsAny(Vec<String>),
}

impl Predicate {
    /// Parameter name of this predicate's family
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::IsPalindrome(_) => IS_PALINDROME,
            Predicate::MinLength(_) => MIN_LENGTH,
            Predicate::MaxLength(_) => MAX_LENGTH,
            Predicate::WordCount(_) => WORD_COUNT,
            Predicate::ContainsAny(_) => CONTAINS_CHARACTER,
        }
    }

    /// Check if a record satisfies this predicate
    pub fn matches(&self, record: &StringRecord) -> bool {
        let props = &record.properties;
        match self {
            Predicate::IsPalindrome(expected) => props.is_palindrome == *expected,
            Predicate::MinLength(min) => props.length >= *min,
            Predicate::MaxLength(max) => props.length <= *max,
            Predicate::WordCount(count) => props.word_count == *count,
            Predicate::ContainsAny(needles) => {
                needles.iter().any(|n| record.value.contains(n.as_str()))
            }
        }
    }

    /// The typed value reported in `filters_applied`
    pub fn applied_value(&self) -> Value {
        match self {
            Predicate::IsPalindrome(b) => Value::Bool(*b),
            Predicate::MinLength(n) | Predicate::MaxLength(n) | Predicate::WordCount(n) => {
                Value::from(*n)
            }
            Predicate::ContainsAny(needles) => Value::from(needles.clone()),
        }
    }

    /// Human-readable form, e.g. `contains_character: "z"`
    pub fn describe(&self) -> String {
        let rendered = match self {
            Predicate::ContainsAny(needles) if needles.len() == 1 => {
                Value::from(needles[0].as_str()).to_string()
            }
            other => other.applied_value().to_string(),
        };
        format!("{}: {}", self.name(), rendered)
    }
}

/// A set of predicates combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check if a record matches all predicates
    pub fn matches(&self, record: &StringRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Records satisfying every predicate, in input order
    pub fn apply(&self, records: &[StringRecord]) -> Vec<StringRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    /// Applied filters keyed by parameter name
    pub fn filters_applied(&self) -> Map<String, Value> {
        self.predicates
            .iter()
            .map(|p| (p.name().to_string(), p.applied_value()))
            .collect()
    }

    /// Applied filters rendered one per line
    pub fn parsed_filters(&self) -> Vec<String> {
        self.predicates.iter().map(Predicate::describe).collect()
    }
}

/// Result of a structured filter query
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: Map<String, Value>,
}

impl FilterOutcome {
    pub fn new(filters: &FilterSet, records: &[StringRecord]) -> Self {
        let data = filters.apply(records);
        Self {
            count: data.len(),
            data,
            filters_applied: filters.filters_applied(),
        }
    }
}
