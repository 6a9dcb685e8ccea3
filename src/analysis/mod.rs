//! # String Analysis
//!
//! Pure derivation of structural properties from a normalized string.
//! Nothing here touches storage or clocks: the same input always yields
//! the same output.

mod digest;
mod properties;

pub use digest::content_digest;
pub use properties::{derive, normalize, StringProperties};
