//! Observability for strindex
//!
//! - Structured JSON log lines (`Logger`)
//! - In-process counters (`MetricsRegistry`), served at `/metrics`
//!
//! Observability is read-only: nothing here changes the outcome of an
//! operation, and a failed log write is ignored.

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
