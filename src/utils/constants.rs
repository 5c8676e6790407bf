//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_DB_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_DB_POOL_SIZE: usize = 16;

pub const DEFAULT_ORACLE_TOKEN_FIELD: &str = "token";
pub const DEFAULT_ORACLE_RESPONSE_POINTER: &str = "/valid";

pub const DEFAULT_CONFIG_PATH: &str = "token-validator.yaml";
