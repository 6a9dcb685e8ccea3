//! Metrics registry
//!
//! Counters only, monotonic, reset on process start. `records` is the one
//! exception: it tracks the current collection size.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the string service
///
/// All counters use relaxed atomics; exact cross-counter consistency is
/// not required.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    strings_created: AtomicU64,
    strings_deleted: AtomicU64,
    duplicates_rejected: AtomicU64,
    filter_queries: AtomicU64,
    nl_queries: AtomicU64,
    nl_unparsed: AtomicU64,
    requests_rejected: AtomicU64,
    records: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose record gauge starts at `records`
    pub fn with_records(records: u64) -> Self {
        let registry = Self::new();
        registry.records.store(records, Ordering::Relaxed);
        registry
    }

    pub fn increment_created(&self) {
        self.strings_created.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.strings_deleted.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn increment_duplicates(&self) {
        self.duplicates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_filter_queries(&self) {
        self.filter_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a natural-language query, and whether it went unparsed
    pub fn record_nl_query(&self, parsed: bool) {
        self.nl_queries.fetch_add(1, Ordering::Relaxed);
        if !parsed {
            self.nl_unparsed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            strings_created: self.strings_created.load(Ordering::Relaxed),
            strings_deleted: self.strings_deleted.load(Ordering::Relaxed),
            duplicates_rejected: self.duplicates_rejected.load(Ordering::Relaxed),
            filter_queries: self.filter_queries.load(Ordering::Relaxed),
            nl_queries: self.nl_queries.load(Ordering::Relaxed),
            nl_unparsed: self.nl_unparsed.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            records: self.records.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub strings_created: u64,
    pub strings_deleted: u64,
    pub duplicates_rejected: u64,
    pub filter_queries: u64,
    pub nl_queries: u64,
    pub nl_unparsed: u64,
    pub requests_rejected: u64,
    pub records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.strings_created, 0);
        assert_eq!(snapshot.nl_queries, 0);
        assert_eq!(snapshot.records, 0);
    }

    #[test]
    fn test_record_gauge_follows_mutations() {
        let registry = MetricsRegistry::with_records(3);
        registry.increment_created();
        registry.increment_created();
        registry.increment_deleted();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.records, 4);
        assert_eq!(snapshot.strings_created, 2);
        assert_eq!(snapshot.strings_deleted, 1);
    }

    #[test]
    fn test_nl_queries() {
        let registry = MetricsRegistry::new();
        registry.record_nl_query(true);
        registry.record_nl_query(false);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.nl_queries, 2);
        assert_eq!(snapshot.nl_unparsed, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_filter_queries();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["filter_queries"], 1);
        assert_eq!(json["duplicates_rejected"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_filter_queries();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().filter_queries, 800);
    }
}
