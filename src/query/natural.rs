//! # Natural-Language Translator
//!
//! Maps a fixed set of canned phrases onto the same filter parameters the
//! structured engine accepts. This is a lookup table, not a parser: the
//! input is trimmed and lower-cased, then matched exactly. Adding a phrase
//! is a data change to [`PHRASE_TABLE`].

use serde::Serialize;

use super::errors::{QueryError, QueryResult};
use super::filter::{FilterSet, CONTAINS_CHARACTER, IS_PALINDROME, MIN_LENGTH, WORD_COUNT};
use super::parser::FilterParams;
use crate::store::StringRecord;

/// Message attached to unrecognized queries
pub const UNPARSED_MESSAGE: &str = "Unable to parse natural language query";

/// The "first vowel" phrase always means this character.
pub const FIRST_VOWEL: &str = "a";

/// One canned phrase and the raw parameters it stands for.
#[derive(Debug, Clone, Copy)]
pub struct CannedPhrase {
    pub phrase: &'static str,
    pub params: &'static [(&'static str, &'static str)],
}

/// Every phrase the translator recognizes.
pub const PHRASE_TABLE: &[CannedPhrase] = &[
    CannedPhrase {
        phrase: "all single word palindromic strings",
        params: &[(IS_PALINDROME, "true"), (WORD_COUNT, "1")],
    },
    CannedPhrase {
        phrase: "strings longer than 10 characters",
        params: &[(MIN_LENGTH, "11")],
    },
    CannedPhrase {
        phrase: "palindromic strings that contain the first vowel",
        params: &[(IS_PALINDROME, "true"), (CONTAINS_CHARACTER, FIRST_VOWEL)],
    },
    CannedPhrase {
        phrase: "strings containing the letter z",
        params: &[(CONTAINS_CHARACTER, "z")],
    },
];

impl CannedPhrase {
    /// Parse the canned parameters through the structured filter parser.
    pub fn filters(&self) -> QueryResult<FilterSet> {
        FilterParams::from_pairs(self.params.iter().copied()).parse()
    }
}

/// Find the canned phrase for `query`, if any.
pub fn lookup(query: &str) -> Option<&'static CannedPhrase> {
    let normalized = query.trim().to_lowercase();
    PHRASE_TABLE.iter().find(|c| c.phrase == normalized)
}

/// How a query was understood
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: Vec<String>,
}

/// Result of a natural-language query.
///
/// An unrecognized phrase is a successful outcome with no data and a
/// `message`, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct NaturalLanguageOutcome {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NaturalLanguageOutcome {
    fn unparsed(original: &str) -> Self {
        Self {
            data: Vec::new(),
            count: 0,
            interpreted_query: InterpretedQuery {
                original: original.to_string(),
                parsed_filters: Vec::new(),
            },
            message: Some(UNPARSED_MESSAGE.to_string()),
        }
    }

    /// True if the query matched a canned phrase
    pub fn is_parsed(&self) -> bool {
        self.message.is_none()
    }
}

/// Interpret `query` against `records`.
///
/// # Errors
///
/// `MissingParam("query")` when the query is absent or blank.
pub fn interpret(query: Option<&str>, records: &[StringRecord]) -> QueryResult<NaturalLanguageOutcome> {
    let original = match query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(QueryError::MissingParam("query".to_string())),
    };

    let Some(canned) = lookup(original) else {
        return Ok(NaturalLanguageOutcome::unparsed(original));
    };

    let filters = canned.filters()?;
    let data = filters.apply(records);

    Ok(NaturalLanguageOutcome {
        count: data.len(),
        data,
        interpreted_query: InterpretedQuery {
            original: original.to_string(),
            parsed_filters: filters.parsed_filters(),
        },
        message: None,
    })
}
