//! # Store Errors

use std::io;

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    // Validation errors
    #[error("Missing required field: value")]
    MissingValue,

    #[error("Invalid data type for \"value\" (must be string)")]
    InvalidValueType,

    // Identity errors
    #[error("String already exists: {0}")]
    Duplicate(String),

    #[error("String not found: {0}")]
    NotFound(String),

    // Durability
    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Persistence collaborator errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persisted data corrupted: {0}")]
    Corrupted(String),

    #[error("Unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl PersistenceError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_converts() {
        let err = PersistenceError::Corrupted("checksum mismatch".to_string());
        let store_err = StoreError::from(err);
        assert!(store_err.to_string().contains("checksum mismatch"));
    }
}
