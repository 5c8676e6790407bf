//! Configuration validation with aggregated errors.
//!
//! Every issue is collected into a `Vec<String>` so a broken config is
//! reported in one pass instead of one error per restart.

use http::Method;
use tracing::{error, info};

use crate::config::oracle::{GenericSourceValue, OracleConfig};
use crate::config::settings::SettingsConfig;
use crate::config::store::{StoreConfig, StoreTypes};
use crate::config::types::ServiceConfig;
use crate::observability::metrics::get_metrics;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_store(&cfg.store, &mut errors);
    validate_oracle(&cfg.oracle, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc();
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' must be a valid port number",
            settings.server.port
        ));
    }
    if settings.metrics.is_enabled && !settings.metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            settings.metrics.path
        ));
    }
    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}

/// STORE VALIDATION
fn validate_store(store: &StoreConfig, errors: &mut Vec<String>) {
    match store.store_type {
        StoreTypes::MEMORY => {}
        StoreTypes::POSTGRES => match &store.postgres {
            None => errors.push("store.postgres is required for store type 'postgres'".to_string()),
            Some(pg) => {
                if pg.host.is_empty() {
                    errors.push("store.postgres.host must not be empty".to_string());
                }
                if pg.dbname.is_empty() {
                    errors.push("store.postgres.dbname must not be empty".to_string());
                }
                if pg.user.is_empty() {
                    errors.push("store.postgres.user must not be empty".to_string());
                }
                if pg.max_size == 0 {
                    errors.push("store.postgres.max_size must be > 0".to_string());
                }
                if pg.timeout_ms == 0 {
                    errors.push("store.postgres.timeout_ms must be > 0".to_string());
                }
            }
        },
    }
}

/// ORACLE VALIDATION
fn validate_oracle(oracle: &OracleConfig, errors: &mut Vec<String>) {
    if !(oracle.url.starts_with("http://") || oracle.url.starts_with("https://")) {
        errors.push(format!(
            "oracle.url '{}' must be an http(s) url",
            oracle.url
        ));
    }
    if oracle.method != Method::GET && oracle.method != Method::POST {
        errors.push(format!(
            "oracle.method '{}' is not supported, use GET or POST",
            oracle.method
        ));
    }
    if oracle.token_field.is_empty() {
        errors.push("oracle.token_field must not be empty".to_string());
    }
    if !oracle.response_pointer.starts_with('/') {
        errors.push(format!(
            "oracle.response_pointer '{}' must be a JSON pointer starting with '/'",
            oracle.response_pointer
        ));
    }
    if oracle.timeout_ms == 0 {
        errors.push("oracle.timeout_ms must be > 0".to_string());
    }
    if let Some(headers) = &oracle.headers {
        for (name, value) in headers {
            match value {
                GenericSourceValue::FromEnv { from_env } if from_env.is_empty() => {
                    errors.push(format!("oracle.headers['{}'].from_env must not be empty", name));
                }
                GenericSourceValue::FromFile { path } if path.is_empty() => {
                    errors.push(format!("oracle.headers['{}'].path must not be empty", name));
                }
                _ => {}
            }
        }
    }
}
