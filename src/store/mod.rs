//! # Record Store Module
//!
//! The owned collection of analyzed strings, its identity rules, and the
//! persistence collaborator it delegates durability to.

mod checksum;
pub mod errors;
pub mod persistence;
pub mod record;
#[allow(clippy::module_inception)]
mod store;

pub use errors::{PersistenceError, PersistenceResult, StoreError, StoreResult};
pub use persistence::{JsonFilePersistence, MemoryPersistence, Persistence};
pub use record::StringRecord;
pub use store::RecordStore;
