//! # Query Module
//!
//! Read-side engines over the record store snapshot:
//! - structured multi-predicate filters (`parser`, `filter`)
//! - the canned natural-language translator (`natural`)

pub mod errors;
pub mod filter;
pub mod natural;
pub mod parser;

pub use errors::{QueryError, QueryResult};
pub use filter::{FilterOutcome, FilterSet, Predicate};
pub use natural::{interpret, InterpretedQuery, NaturalLanguageOutcome, PHRASE_TABLE};
pub use parser::{filter_records, FilterParams};
