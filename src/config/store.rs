use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_DB_TIMEOUT_MS};

/// ================================
/// Record store
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub store_type: StoreTypes, // memory, postgres
    pub postgres: Option<PostgresConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreTypes {
    MEMORY,
    POSTGRES,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub dbname: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// pool wait / connect timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_port() -> u16 {
    5432
}

fn default_max_size() -> usize {
    DEFAULT_DB_POOL_SIZE
}

fn default_timeout_ms() -> u64 {
    DEFAULT_DB_TIMEOUT_MS
}
