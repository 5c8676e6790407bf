//! PostgreSQL record store.
//!
//! Records live in the `tokens` table:
//! `user_id BIGINT, token TEXT, validated BOOLEAN, PRIMARY KEY (user_id, token)`.
//! Tokens are opaque and may be longer than 255 chars.

use anyhow::{anyhow, Context, Result};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime, Timeouts};
use std::time::Duration;
use tokio_postgres::NoTls;
use tracing::{debug, info};

use crate::cache::validation_record::{RecordKey, ValidationRecord};
use crate::config::store::PostgresConfig;
use crate::store::RecordStore;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS tokens (\
    user_id BIGINT NOT NULL, \
    token TEXT NOT NULL, \
    validated BOOLEAN NOT NULL, \
    PRIMARY KEY (user_id, token))";

const LOOKUP_SQL: &str = "SELECT validated FROM tokens WHERE user_id = $1 AND token = $2";

const UPSERT_SQL: &str = "INSERT INTO tokens (user_id, token, validated) VALUES ($1, $2, $3) \
    ON CONFLICT (user_id, token) DO UPDATE SET validated = EXCLUDED.validated";

#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: Pool,
}

impl PostgresRecordStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn from_config(cfg: &PostgresConfig) -> Result<Self> {
        let mut pool_cfg = Config::new();
        pool_cfg.host = Some(cfg.host.clone());
        pool_cfg.port = Some(cfg.port);
        pool_cfg.dbname = Some(cfg.dbname.clone());
        pool_cfg.user = Some(cfg.user.clone());
        pool_cfg.password = Some(cfg.password.clone());
        pool_cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        let mut pool_settings = deadpool_postgres::PoolConfig::new(cfg.max_size);
        let timeout = Duration::from_millis(cfg.timeout_ms);
        pool_settings.timeouts = Timeouts {
            wait: Some(timeout),
            create: Some(timeout),
            recycle: Some(timeout),
        };
        pool_cfg.pool = Some(pool_settings);

        let pool = pool_cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| anyhow!("failed to create postgres pool: {}", e))?;
        info!("postgres record store configured, host: {}, db: {}", cfg.host, cfg.dbname);
        Ok(Self::new(pool))
    }

    /// Build a store from a `postgres://` connection url
    pub fn from_url(url: &str, max_size: usize) -> Result<Self> {
        let mut pool_cfg = Config::new();
        pool_cfg.url = Some(url.to_owned());
        pool_cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        pool_cfg.pool = Some(deadpool_postgres::PoolConfig::new(max_size));
        let pool = pool_cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| anyhow!("failed to create postgres pool: {}", e))?;
        Ok(Self::new(pool))
    }

    async fn get_conn(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow!("postgres connection unavailable: {}", e))
    }

    /// Create the `tokens` table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(CREATE_TABLE_SQL)
            .await
            .context("creating tokens table")?;
        debug!("tokens table ready");
        Ok(())
    }

    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }
}

impl RecordStore for PostgresRecordStore {
    async fn lookup(&self, key: &RecordKey) -> Result<Option<bool>> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_opt(LOOKUP_SQL, &[&key.identity, &key.token])
            .await
            .context("selecting validation record")?;
        Ok(row.map(|r| r.get::<_, bool>(0)))
    }

    async fn upsert(&self, record: &ValidationRecord) -> Result<()> {
        let conn = self.get_conn().await?;
        conn.execute(
            UPSERT_SQL,
            &[&record.key.identity, &record.key.token, &record.validated],
        )
        .await
        .context("upserting validation record")?;
        Ok(())
    }
}

impl std::fmt::Debug for PostgresRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresRecordStore")
            .field("pool_size", &self.pool_size())
            .finish()
    }
}
