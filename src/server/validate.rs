use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::cache::error::ValidationError;
use crate::cache::validation_cache::ValidationCache;
use crate::oracle::ValidationOracle;
use crate::server::server::AppState;
use crate::store::RecordStore;

pub const VALIDATE_PATH: &str = "/validate";

pub struct ValidationState<S, O> {
    cache: ValidationCache<S, O>,
}

impl<S, O> Clone for ValidationState<S, O> {
    fn clone(&self) -> Self {
        Self { cache: self.cache.clone() }
    }
}

impl<S, O> ValidationState<S, O>
where
    S: RecordStore + 'static,
    O: ValidationOracle + 'static,
{
    pub fn new(cache: ValidationCache<S, O>) -> Self {
        Self { cache }
    }

    pub fn router(&self) -> Router<AppState<S, O>> {
        Router::new().route(VALIDATE_PATH, post(handle_validate::<S, O>))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateRequest {
    pub identity: i64,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateResponse {
    pub validated: bool,
}

async fn handle_validate<S, O>(
    State(state): State<AppState<S, O>>,
    Json(request): Json<ValidateRequest>,
) -> Response
where
    S: RecordStore + 'static,
    O: ValidationOracle + 'static,
{
    if request.token.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "token must not be empty"}))).into_response();
    }

    match state
        .validation_state
        .cache
        .validate_user_token(request.identity, &request.token)
        .await
    {
        Ok(validated) => (StatusCode::OK, Json(ValidateResponse { validated })).into_response(),
        Err(err) => {
            warn!("validation for identity {} failed: {}", request.identity, err);
            (status_for(&err), Json(json!({"error": err.to_string()}))).into_response()
        }
    }
}

fn status_for(err: &ValidationError) -> StatusCode {
    match err {
        ValidationError::Oracle(_) => StatusCode::BAD_GATEWAY,
        ValidationError::StoreLookup(_) | ValidationError::StoreWrite(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
