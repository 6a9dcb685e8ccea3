//! # Query Errors

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Validation errors raised while normalizing query parameters.
///
/// An unrecognized natural-language phrase is not an error; see
/// [`super::natural::NaturalLanguageOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A filter parameter had a value of the wrong shape
    #[error("Invalid query parameter {name}: {reason}")]
    InvalidParam { name: String, reason: String },

    /// min_length greater than max_length
    #[error("Invalid query parameters: min_length ({min}) is greater than max_length ({max})")]
    InvalidRange { min: usize, max: usize },

    /// A mandatory parameter was absent or blank
    #[error("Missing required parameter: {0}")]
    MissingParam(String),
}

impl QueryError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        QueryError::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
