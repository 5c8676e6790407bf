use anyhow::{anyhow, Context, Result};
use http::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use std::{env, fs};
use tracing::debug;

use crate::config::oracle::{GenericSourceValue, OracleConfig};
use crate::oracle::ValidationOracle;

/// Vendor validation endpoint reached over HTTP.
///
/// GET sends the token as a query parameter, any other method as a JSON body
/// field. The verdict is read from `response_pointer` and must be a boolean.
/// Header values are resolved once, when the oracle is built.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    cfg: Arc<OracleConfig>,
    headers: HeaderMap,
    client: Client,
}

impl HttpOracle {
    pub fn new(cfg: OracleConfig) -> Result<Self> {
        let headers = resolve_headers(&cfg)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("building validation oracle http client")?;
        Ok(Self { cfg: Arc::new(cfg), headers, client })
    }

    pub fn url(&self) -> &str {
        &self.cfg.url
    }
}

impl ValidationOracle for HttpOracle {
    async fn validate_token(&self, token: &str) -> Result<bool> {
        let cfg = &self.cfg;
        let mut request = self
            .client
            .request(cfg.method.clone(), &cfg.url)
            .headers(self.headers.clone());

        request = if cfg.method == Method::GET {
            request.query(&[(cfg.token_field.as_str(), token)])
        } else {
            let mut body = serde_json::Map::new();
            body.insert(cfg.token_field.to_owned(), json!(token));
            request.json(&body)
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("validation oracle request failed: {}", response.status()));
        }
        let body: Value = response
            .json()
            .await
            .context("validation oracle returned a non-JSON body")?;
        debug!("validation oracle answered: {}", body);

        body.pointer(&cfg.response_pointer)
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                anyhow!(
                    "validation oracle response has no boolean at '{}'",
                    cfg.response_pointer
                )
            })
    }
}

fn resolve_headers(cfg: &OracleConfig) -> Result<HeaderMap> {
    let mut resolved = HeaderMap::new();
    let Some(headers) = &cfg.headers else {
        return Ok(resolved);
    };
    for (key, v) in headers {
        let value = prepare_generic_source_value(v)
            .with_context(|| format!("resolving oracle header '{}'", key))?;
        let name = HeaderName::from_bytes(key.as_bytes())
            .with_context(|| format!("invalid oracle header name '{}'", key))?;
        let value = HeaderValue::from_str(&value)
            .with_context(|| format!("invalid value for oracle header '{}'", key))?;
        resolved.insert(name, value);
    }
    Ok(resolved)
}

fn prepare_generic_source_value(value: &GenericSourceValue) -> Result<String> {
    match value {
        GenericSourceValue::Literal { value } => Ok(value.to_owned()),
        GenericSourceValue::FromEnv { from_env } => {
            env::var(from_env).map_err(|err| anyhow!("env var {}: {}", from_env, err))
        }
        GenericSourceValue::FromFile { path } => fs::read_to_string(path)
            .map_err(|err| anyhow!("file {}: {}", path, err))
            .map(|res| res.trim().to_string()),
    }
}
