#[cfg(test)]
pub mod common;
pub mod config_validation;
pub mod postgres_store;
