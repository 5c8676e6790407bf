use serde::Deserialize;

use crate::config::{oracle::OracleConfig, settings::SettingsConfig, store::StoreConfig};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub store: StoreConfig,
    pub oracle: OracleConfig,
}
