//! Shared handler state

use crate::observability::MetricsRegistry;
use crate::store::{RecordStore, StoreError, StoreResult};

use super::errors::ApiError;

/// State shared by every handler: the one record store and the counters.
#[derive(Debug)]
pub struct AppState {
    pub store: RecordStore,
    pub metrics: MetricsRegistry,
}

impl AppState {
    /// Seeds the `records` gauge from the loaded store.
    pub fn new(store: RecordStore) -> StoreResult<Self> {
        let metrics = MetricsRegistry::with_records(store.len()? as u64);
        Ok(Self { store, metrics })
    }

    /// Count a failed request and hand the error back for the response.
    pub fn reject(&self, err: impl Into<ApiError>) -> ApiError {
        let err = err.into();
        if matches!(err, ApiError::Store(StoreError::Duplicate(_))) {
            self.metrics.increment_duplicates();
        }
        if err.status_code().is_client_error() {
            self.metrics.increment_rejected();
        }
        err
    }
}
