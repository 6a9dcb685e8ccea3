//! # Query Parameter Parser
//!
//! Normalizes tolerant query parameters into a typed [`FilterSet`].
//!
//! Each field is resolved exactly once to absent, a typed value, or a
//! validation error, before any record is examined. Repeated keys are
//! accepted: scalar fields use the first occurrence, `contains_character`
//! uses all of them.

use std::collections::HashMap;

use super::errors::{QueryError, QueryResult};
use super::filter::{
    FilterOutcome, FilterSet, Predicate, CONTAINS_CHARACTER, IS_PALINDROME, MAX_LENGTH,
    MIN_LENGTH, WORD_COUNT,
};
use crate::store::StringRecord;

/// Raw filter parameters, possibly with repeated keys
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    values: HashMap<String, Vec<String>>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered key/value pairs, as they arrive in a query string.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.push(key, value);
        }
        params
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value supplied for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Every value supplied for `key`, in order
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate and convert into typed predicates.
    ///
    /// # Errors
    ///
    /// `InvalidParam` for a malformed boolean or integer, `InvalidRange`
    /// when `min_length > max_length`.
    pub fn parse(&self) -> QueryResult<FilterSet> {
        let is_palindrome = self.first(IS_PALINDROME).map(parse_bool).transpose()?;
        let min_length = self
            .first(MIN_LENGTH)
            .map(|v| parse_count(MIN_LENGTH, v))
            .transpose()?;
        let max_length = self
            .first(MAX_LENGTH)
            .map(|v| parse_count(MAX_LENGTH, v))
            .transpose()?;
        let word_count = self
            .first(WORD_COUNT)
            .map(|v| parse_count(WORD_COUNT, v))
            .transpose()?;
        let needles = parse_needles(self.all(CONTAINS_CHARACTER));

        if let (Some(min), Some(max)) = (min_length, max_length) {
            if min > max {
                return Err(QueryError::InvalidRange { min, max });
            }
        }

        let mut filters = FilterSet::new();
        if let Some(b) = is_palindrome {
            filters = filters.and(Predicate::IsPalindrome(b));
        }
        if let Some(n) = min_length {
            filters = filters.and(Predicate::MinLength(n));
        }
        if let Some(n) = max_length {
            filters = filters.and(Predicate::MaxLength(n));
        }
        if let Some(n) = word_count {
            filters = filters.and(Predicate::WordCount(n));
        }
        if !needles.is_empty() {
            filters = filters.and(Predicate::ContainsAny(needles));
        }

        Ok(filters)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Parse `params` and apply them to `records`.
///
/// Validation runs to completion before any record is examined.
pub fn filter_records(params: &FilterParams, records: &[StringRecord]) -> QueryResult<FilterOutcome> {
    let filters = params.parse()?;
    Ok(FilterOutcome::new(&filters, records))
}

fn parse_bool(value: &str) -> QueryResult<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(QueryError::invalid(
            IS_PALINDROME,
            format!("expected true or false, got '{}'", value),
        ))
    }
}

fn parse_count(name: &str, value: &str) -> QueryResult<usize> {
    let value = value.trim();
    if value.is_empty() {
        return Err(QueryError::invalid(name, "value cannot be empty"));
    }
    value.parse::<usize>().map_err(|_| {
        QueryError::invalid(
            name,
            format!("expected a non-negative integer, got '{}'", value),
        )
    })
}

fn parse_needles(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> QueryResult<FilterSet> {
        FilterParams::from_pairs(pairs.iter().copied()).parse()
    }

    #[test]
    fn test_no_params_no_filters() {
        assert!(parse(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bool_case_insensitive() {
        let filters = parse(&[("is_palindrome", "TRUE")]).unwrap();
        assert_eq!(filters.predicates, vec![Predicate::IsPalindrome(true)]);

        let filters = parse(&[("is_palindrome", " False ")]).unwrap();
        assert_eq!(filters.predicates, vec![Predicate::IsPalindrome(false)]);
    }

    #[test]
    fn test_bool_rejects_other_tokens() {
        for bad in ["yes", "1", "", "truthy"] {
            let err = parse(&[("is_palindrome", bad)]).unwrap_err();
            assert!(matches!(err, QueryError::InvalidParam { ref name, .. } if name == "is_palindrome"));
        }
    }

    #[test]
    fn test_numeric_params() {
        let filters = parse(&[("min_length", "3"), ("max_length", "10"), ("word_count", "2")]).unwrap();
        assert_eq!(
            filters.predicates,
            vec![
                Predicate::MinLength(3),
                Predicate::MaxLength(10),
                Predicate::WordCount(2)
            ]
        );
    }

    #[test]
    fn test_numeric_rejects_empty_and_garbage() {
        for (key, bad) in [
            ("min_length", ""),
            ("max_length", "ten"),
            ("word_count", "-1"),
            ("min_length", "2.5"),
        ] {
            let err = parse(&[(key, bad)]).unwrap_err();
            assert!(matches!(err, QueryError::InvalidParam { ref name, .. } if name == key));
        }
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        assert_eq!(
            parse(&[("min_length", "5"), ("max_length", "3")]).unwrap_err(),
            QueryError::InvalidRange { min: 5, max: 3 }
        );
    }

    #[test]
    fn test_equal_bounds_allowed() {
        assert!(parse(&[("min_length", "4"), ("max_length", "4")]).is_ok());
    }

    #[test]
    fn test_contains_character_collects_all_values() {
        let filters = parse(&[
            ("contains_character", "A"),
            ("contains_character", "  "),
            ("contains_character", " z "),
        ])
        .unwrap();
        assert_eq!(
            filters.predicates,
            vec![Predicate::ContainsAny(vec!["a".to_string(), "z".to_string()])]
        );
    }

    #[test]
    fn test_blank_contains_character_is_absent() {
        assert!(parse(&[("contains_character", " ")]).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_uses_first_occurrence() {
        let filters = parse(&[("word_count", "1"), ("word_count", "oops")]).unwrap();
        assert_eq!(filters.predicates, vec![Predicate::WordCount(1)]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert!(parse(&[("limit", "10"), ("sort", "asc")]).unwrap().is_empty());
    }
}
