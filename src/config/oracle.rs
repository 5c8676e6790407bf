use http::Method;
use serde::Deserialize;
use std::collections::HashMap;

use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_ORACLE_RESPONSE_POINTER, DEFAULT_ORACLE_TOKEN_FIELD,
};

/// ================================
/// Validation oracle (vendor endpoint)
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    pub url: String,
    #[serde(with = "http_serde::method", default = "default_method")]
    pub method: Method, // GET, POST
    pub headers: Option<HashMap<String, GenericSourceValue>>,
    /// query parameter (GET) or JSON body field (POST) carrying the token
    #[serde(default = "default_token_field")]
    pub token_field: String,
    /// JSON pointer to the boolean verdict in the response body
    #[serde(default = "default_response_pointer")]
    pub response_pointer: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Header value sources
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum GenericSourceValue {
    Literal {
        value: String,
    },
    FromEnv {
        from_env: String,
    },
    FromFile {
        path: String,
    },
}

fn default_method() -> Method {
    Method::POST
}

fn default_token_field() -> String {
    DEFAULT_ORACLE_TOKEN_FIELD.to_owned()
}

fn default_response_pointer() -> String {
    DEFAULT_ORACLE_RESPONSE_POINTER.to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
