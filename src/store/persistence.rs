//! Persistence collaborator
//!
//! The store treats durability as an opaque blob: `load` once at startup,
//! `save` the full collection after every mutation. The on-disk format is
//! a single JSON document:
//!
//! ```text
//! {"format_version": 1, "checksum": <crc32>, "records": [...]}
//! ```
//!
//! The checksum covers the canonical serialization of `records`. Writes go
//! to a temp file which is fsynced and renamed over the target, so a crash
//! mid-write leaves the previous collection intact.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{PersistenceError, PersistenceResult};
use super::record::StringRecord;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// File name of the persisted collection inside the data directory
pub const STORE_FILE_NAME: &str = "strings.json";

/// Durable storage for the record collection.
pub trait Persistence: Send + Sync {
    /// Load the full collection in insertion order.
    fn load(&self) -> PersistenceResult<Vec<StringRecord>>;

    /// Durably replace the stored collection with `records`.
    fn save(&self, records: &[StringRecord]) -> PersistenceResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCollection {
    format_version: u32,
    checksum: u32,
    records: Value,
}

/// Persistence backed by one JSON file.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Opens persistence rooted at `data_dir`, creating the directory if missing.
    pub fn open(data_dir: &Path) -> PersistenceResult<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)
                .map_err(|e| PersistenceError::io(data_dir.display().to_string(), e))?;
        }

        Ok(Self {
            path: data_dir.join(STORE_FILE_NAME),
        })
    }

    /// Returns the path of the persisted collection.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> PersistenceResult<Vec<StringRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(self.path.display().to_string(), e)),
        };

        let persisted: PersistedCollection = serde_json::from_slice(&bytes)?;

        if persisted.format_version != FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: persisted.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let canonical = serde_json::to_vec(&persisted.records)?;
        if !verify_checksum(&canonical, persisted.checksum) {
            return Err(PersistenceError::Corrupted(format!(
                "checksum mismatch in {}",
                self.path.display()
            )));
        }

        Ok(serde_json::from_value(persisted.records)?)
    }

    fn save(&self, records: &[StringRecord]) -> PersistenceResult<()> {
        let records = serde_json::to_value(records)?;
        let checksum = compute_checksum(&serde_json::to_vec(&records)?);
        let body = serde_json::to_vec_pretty(&PersistedCollection {
            format_version: FORMAT_VERSION,
            checksum,
            records,
        })?;

        let temp_path = self.temp_path();
        let io_err = |e| PersistenceError::io(temp_path.display().to_string(), e);

        let mut file = File::create(&temp_path).map_err(io_err)?;
        file.write_all(&body).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .map_err(|e| PersistenceError::io(self.path.display().to_string(), e))
    }
}

/// In-memory persistence for ephemeral runs and tests.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    records: Mutex<Vec<StringRecord>>,
    saves: AtomicUsize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the collection returned by `load`.
    pub fn with_records(records: Vec<StringRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> PersistenceResult<Vec<StringRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| PersistenceError::Corrupted("Lock poisoned".to_string()))?;
        Ok(records.clone())
    }

    fn save(&self, records: &[StringRecord]) -> PersistenceResult<()> {
        let mut stored = self
            .records
            .lock()
            .map_err(|_| PersistenceError::Corrupted("Lock poisoned".to_string()))?;
        *stored = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
