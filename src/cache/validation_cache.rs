use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::cache::error::ValidationError;
use crate::cache::validation_record::{RecordKey, ValidationRecord};
use crate::observability::metrics::get_metrics;
use crate::oracle::ValidationOracle;
use crate::store::RecordStore;

static HIT_MSG: &'static str = "hit";
static MISS_MSG: &'static str = "miss";
static NEGATIVE_MSG: &'static str = "negative";
static LOOKUP_MSG: &'static str = "lookup";
static UPSERT_MSG: &'static str = "upsert";

/// Write-through validation cache.
///
/// Only a stored `validated = true` short-circuits the oracle. A stored
/// `false` is re-checked on every call and overwritten with the new verdict.
/// Concurrent cold calls for one key are not coalesced: each may reach the
/// oracle, and the store's upsert keeps a single row per key.
pub struct ValidationCache<S, O> {
    store: Arc<S>,
    oracle: Arc<O>,
}

impl<S, O> Clone for ValidationCache<S, O> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            oracle: self.oracle.clone(),
        }
    }
}

impl<S, O> ValidationCache<S, O>
where
    S: RecordStore,
    O: ValidationOracle,
{
    pub fn new(store: S, oracle: O) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(oracle))
    }

    pub fn from_shared(store: Arc<S>, oracle: Arc<O>) -> Self {
        Self { store, oracle }
    }

    /// Decide whether `token` is valid for `identity`.
    ///
    /// Dropping the returned future cancels the in-flight store or oracle
    /// call. The record write is a single upsert, so it either lands whole or
    /// not at all.
    pub async fn validate_user_token(
        &self,
        identity: i64,
        token: &str,
    ) -> Result<bool, ValidationError> {
        let metrics = get_metrics().await;
        let start = Instant::now();

        let result = self.lookup_or_validate(identity, token).await;

        metrics
            .validation_duration
            .observe(start.elapsed().as_secs_f64());
        let outcome = match &result {
            Ok(true) => "valid",
            Ok(false) => "invalid",
            Err(err) => err.kind(),
        };
        metrics.validation_requests.with_label_values(&[outcome]).inc();
        result
    }

    async fn lookup_or_validate(
        &self,
        identity: i64,
        token: &str,
    ) -> Result<bool, ValidationError> {
        let metrics = get_metrics().await;
        let key = RecordKey::new(identity, token);

        // 1. cached verdict
        match self.store.lookup(&key).await {
            Ok(Some(true)) => {
                debug!("cache hit for identity {}", identity);
                metrics.cache_lookups.with_label_values(&[HIT_MSG]).inc();
                return Ok(true);
            }
            Ok(Some(false)) => {
                debug!("negative record for identity {}, re-checking with oracle", identity);
                metrics.cache_lookups.with_label_values(&[NEGATIVE_MSG]).inc();
            }
            Ok(None) => {
                debug!("cache miss for identity {}", identity);
                metrics.cache_lookups.with_label_values(&[MISS_MSG]).inc();
            }
            Err(err) => {
                error!("record lookup for identity {} failed: {}", identity, err);
                metrics.store_failures.with_label_values(&[LOOKUP_MSG]).inc();
                return Err(ValidationError::StoreLookup(err));
            }
        }

        // 2. oracle
        info!("validating token for identity {} with oracle", identity);
        let start = Instant::now();
        metrics.oracle_calls.inc();
        let validated = self
            .oracle
            .validate_token(token)
            .await
            .inspect(|_| {
                metrics
                    .oracle_duration
                    .observe(start.elapsed().as_secs_f64());
            })
            .map_err(|err| {
                metrics
                    .oracle_duration
                    .observe(start.elapsed().as_secs_f64());
                metrics.oracle_failures.inc();
                warn!("oracle failed for identity {}: {}", identity, err);
                ValidationError::Oracle(err)
            })?;

        // 3. write through
        let record = ValidationRecord::new(key, validated);
        self.store.upsert(&record).await.map_err(|err| {
            metrics.store_failures.with_label_values(&[UPSERT_MSG]).inc();
            error!(
                "storing verdict {} for identity {} failed: {}",
                validated, identity, err
            );
            ValidationError::StoreWrite(err)
        })?;

        info!("identity {} token validated: {}", identity, validated);
        Ok(validated)
    }
}
