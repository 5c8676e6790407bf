use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::cache::validation_cache::ValidationCache;
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::oracle::ValidationOracle;
use crate::server::validate::ValidationState;
use crate::store::RecordStore;

pub struct AppState<S, O> {
    pub metrics_state: MetricsState,
    pub validation_state: ValidationState<S, O>,
}

impl<S, O> Clone for AppState<S, O> {
    fn clone(&self) -> Self {
        Self {
            metrics_state: self.metrics_state.clone(),
            validation_state: self.validation_state.clone(),
        }
    }
}

impl<S, O> AppState<S, O>
where
    S: RecordStore + 'static,
    O: ValidationOracle + 'static,
{
    pub fn new(metrics: &Metrics, cache: ValidationCache<S, O>) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            validation_state: ValidationState::new(cache),
        }
    }
}

/// Assemble validation, health and (optionally) metrics routes.
pub async fn build_router<S, O>(settings_config: &SettingsConfig, cache: ValidationCache<S, O>) -> Router
where
    S: RecordStore + 'static,
    O: ValidationOracle + 'static,
{
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, cache);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .merge(state.validation_state.router())
        .merge(state.metrics_state.router::<S, O>(&settings_config.metrics))
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
pub async fn start<S, O>(settings_config: &SettingsConfig, cache: ValidationCache<S, O>) -> Result<()>
where
    S: RecordStore + 'static,
    O: ValidationOracle + 'static,
{
    let app = build_router(settings_config, cache).await;

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    get_metrics().await.up.set(1);
    axum::serve(listener, app).await.context("http server failed")?;
    Ok(())
}
