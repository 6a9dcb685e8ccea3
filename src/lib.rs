//! strindex - string analysis with durable storage and structured queries
//!
//! Layers, leaf-first:
//! - `analysis`: pure property derivation
//! - `store`: the owned record collection and its persistence collaborator
//! - `query`: structured filters and the canned natural-language translator
//! - `http_server` / `cli`: thin adapters over the core

pub mod analysis;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod store;
