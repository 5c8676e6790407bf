//! Validation oracles
//!
//! An oracle is the external authority consulted when no usable cached
//! record exists. It sees the token only, never the identity.

use std::future::Future;

use anyhow::Result;

pub mod http;

pub trait ValidationOracle: Send + Sync {
    fn validate_token(&self, token: &str) -> impl Future<Output = Result<bool>> + Send;
}
