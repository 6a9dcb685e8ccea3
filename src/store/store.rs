//! # Record Store
//!
//! Owns the single mutable collection of string records.
//!
//! - `insert` and `delete` take the write lock for both the in-memory
//!   mutation and the durable write; a failed write rolls the mutation back.
//! - `get` and `list` take the read lock and return owned snapshots.
//! - Records are never updated in place.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde_json::Value;

use crate::analysis::normalize;

use super::errors::{PersistenceError, StoreError, StoreResult};
use super::persistence::Persistence;
use super::record::StringRecord;

/// The record store, constructed once from its persistence collaborator.
pub struct RecordStore {
    records: RwLock<Vec<StringRecord>>,
    persistence: Box<dyn Persistence>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records.read().map(|r| r.len()).ok())
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Loads the persisted collection and takes ownership of it.
    ///
    /// # Errors
    ///
    /// Fails if the collaborator cannot load, or if any loaded record is
    /// inconsistent with its value or duplicates another record.
    pub fn open(persistence: Box<dyn Persistence>) -> StoreResult<Self> {
        let records = persistence.load()?;
        Self::verify_loaded(&records)?;

        Ok(Self {
            records: RwLock::new(records),
            persistence,
        })
    }

    fn verify_loaded(records: &[StringRecord]) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !record.is_consistent() {
                return Err(PersistenceError::Corrupted(format!(
                    "record {} does not match its value",
                    record.id
                ))
                .into());
            }
            if !seen.insert(record.value.as_str()) {
                return Err(PersistenceError::Corrupted(format!(
                    "duplicate value for record {}",
                    record.id
                ))
                .into());
            }
        }
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<StringRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<StringRecord>>> {
        self.records
            .write()
            .map_err(|_| StoreError::Internal("Lock poisoned".to_string()))
    }

    /// Inserts from a request body of the form `{"value": "<string>"}`.
    ///
    /// A missing `value` and a non-string `value` are distinct validation errors.
    pub fn insert_json(&self, body: &Value) -> StoreResult<StringRecord> {
        match body.get("value") {
            None | Some(Value::Null) => Err(StoreError::MissingValue),
            Some(Value::String(value)) => self.insert(value),
            Some(_) => Err(StoreError::InvalidValueType),
        }
    }

    /// Normalizes `raw`, derives its record, appends it and persists.
    pub fn insert(&self, raw: &str) -> StoreResult<StringRecord> {
        let value = normalize(raw);
        let mut records = self.write()?;

        if records.iter().any(|r| r.value == value) {
            return Err(StoreError::Duplicate(value));
        }

        let record = StringRecord::new(&value, Utc::now());
        records.push(record.clone());

        if let Err(e) = self.persistence.save(&records) {
            records.pop();
            return Err(e.into());
        }

        Ok(record)
    }

    /// Looks up a record by normalized value.
    pub fn get(&self, raw: &str) -> StoreResult<StringRecord> {
        let value = normalize(raw);
        self.read()?
            .iter()
            .find(|r| r.value == value)
            .cloned()
            .ok_or(StoreError::NotFound(value))
    }

    /// Returns all records in insertion order.
    pub fn list(&self) -> StoreResult<Vec<StringRecord>> {
        Ok(self.read()?.clone())
    }

    /// Removes the record with the given normalized value and persists.
    ///
    /// Nothing is written when the value is absent.
    pub fn delete(&self, raw: &str) -> StoreResult<()> {
        let value = normalize(raw);
        let mut records = self.write()?;

        let position = records
            .iter()
            .position(|r| r.value == value)
            .ok_or(StoreError::NotFound(value))?;
        let removed = records.remove(position);

        if let Err(e) = self.persistence.save(&records) {
            records.insert(position, removed);
            return Err(e.into());
        }

        Ok(())
    }

    /// Number of stored records
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persistence::MemoryPersistence;
    use serde_json::json;

    fn empty_store() -> RecordStore {
        RecordStore::open(Box::new(MemoryPersistence::new())).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let store = empty_store();
        let created = store.insert("Racecar").unwrap();

        assert_eq!(created.value, "racecar");
        assert_eq!(store.get("RACECAR").unwrap(), created);
    }

    #[test]
    fn test_duplicate_rejected_case_insensitively() {
        let store = empty_store();
        store.insert("racecar").unwrap();

        let err = store.insert("RaceCar").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(v) if v == "racecar"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_insert_json_validation() {
        let store = empty_store();

        assert!(matches!(
            store.insert_json(&json!({})).unwrap_err(),
            StoreError::MissingValue
        ));
        assert!(matches!(
            store.insert_json(&json!({"value": null})).unwrap_err(),
            StoreError::MissingValue
        ));
        assert!(matches!(
            store.insert_json(&json!({"value": 42})).unwrap_err(),
            StoreError::InvalidValueType
        ));
        assert!(matches!(
            store.insert_json(&json!({"value": ["a"]})).unwrap_err(),
            StoreError::InvalidValueType
        ));
        assert!(store.is_empty().unwrap());

        let record = store.insert_json(&json!({"value": "Zebra"})).unwrap();
        assert_eq!(record.value, "zebra");
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = empty_store();
        for value in ["zebra", "apple", "mango"] {
            store.insert(value).unwrap();
        }

        let values: Vec<_> = store.list().unwrap().into_iter().map(|r| r.value).collect();
        assert_eq!(values, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_delete() {
        let store = empty_store();
        store.insert("apple").unwrap();

        store.delete("APPLE").unwrap();
        assert!(store.is_empty().unwrap());
        assert!(matches!(
            store.get("apple").unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_delete_missing() {
        let store = empty_store();
        assert!(matches!(
            store.delete("ghost").unwrap_err(),
            StoreError::NotFound(v) if v == "ghost"
        ));
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = empty_store();
        store.insert("apple").unwrap();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.records.write().unwrap();
            panic!("writer died holding the lock");
        }));

        assert!(matches!(store.len(), Err(StoreError::Internal(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Internal(_))));
        assert!(matches!(store.list(), Err(StoreError::Internal(_))));
    }

    #[test]
    fn test_open_rejects_inconsistent_records() {
        let mut record = StringRecord::new("apple", Utc::now());
        record.id = "0".repeat(64);

        let persistence = MemoryPersistence::with_records(vec![record]);
        let err = RecordStore::open(Box::new(persistence)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Persistence(PersistenceError::Corrupted(_))
        ));
    }

    #[test]
    fn test_open_rejects_duplicate_records() {
        let now = Utc::now();
        let persistence = MemoryPersistence::with_records(vec![
            StringRecord::new("apple", now),
            StringRecord::new("Apple", now),
        ]);

        assert!(RecordStore::open(Box::new(persistence)).is_err());
    }
}
