//! # Token Validation Library
//!
//! Decides whether a user's token is valid, preferring a previously
//! recorded verdict over an expensive call to an external validation
//! vendor, and writing every vendor verdict back to the record store.
//!
//! Modules:
//! - `cache` — the write-through validation cache and its records
//! - `store` — record stores (in-memory, PostgreSQL)
//! - `oracle` — validation oracles (HTTP vendor endpoint)
//! - `config` — service configuration, loading and validation
//! - `server` — HTTP surface of the owning service

pub mod cache;
pub mod config;
pub mod observability;
pub mod oracle;
pub mod server;
pub mod store;
pub mod tests;
pub mod utils;


pub use crate::cache::error::ValidationError;
pub use crate::cache::validation_cache::ValidationCache;
pub use crate::cache::validation_record::{RecordKey, ValidationRecord};
pub use crate::config::types::ServiceConfig;
pub use crate::oracle::ValidationOracle;
pub use crate::store::RecordStore;
