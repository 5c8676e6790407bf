//! Record stores
//!
//! Durable (identity, token) -> validated persistence behind a narrow
//! lookup/upsert capability, plus a factory building the configured backend.

use std::future::Future;

use anyhow::Result;

use crate::cache::validation_record::{RecordKey, ValidationRecord};
use crate::config::store::{StoreConfig, StoreTypes};

pub mod memory;
pub mod postgres;

use memory::InMemoryRecordStore;
use postgres::PostgresRecordStore;

pub trait RecordStore: Send + Sync {
    /// `Ok(None)` means no record for the key, which is not a failure.
    fn lookup(&self, key: &RecordKey) -> impl Future<Output = Result<Option<bool>>> + Send;

    /// Insert or overwrite the record for its key in one atomic write.
    fn upsert(&self, record: &ValidationRecord) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Clone)]
pub enum StoreKind {
    Memory(InMemoryRecordStore),
    Postgres(PostgresRecordStore),
}

impl StoreKind {
    pub fn name(&self) -> &'static str {
        match self {
            StoreKind::Memory(_) => "memory",
            StoreKind::Postgres(_) => "postgres",
        }
    }
}

impl RecordStore for StoreKind {
    async fn lookup(&self, key: &RecordKey) -> Result<Option<bool>> {
        match self {
            StoreKind::Memory(s) => s.lookup(key).await,
            StoreKind::Postgres(s) => s.lookup(key).await,
        }
    }

    async fn upsert(&self, record: &ValidationRecord) -> Result<()> {
        match self {
            StoreKind::Memory(s) => s.upsert(record).await,
            StoreKind::Postgres(s) => s.upsert(record).await,
        }
    }
}

/// Build the configured store. Postgres tables are created when missing.
pub async fn build_store(cfg: &StoreConfig) -> Result<StoreKind> {
    match cfg.store_type {
        StoreTypes::MEMORY => Ok(StoreKind::Memory(InMemoryRecordStore::new())),
        StoreTypes::POSTGRES => {
            let pg_cfg = cfg
                .postgres
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("store.postgres must be set for postgres store"))?;
            let store = PostgresRecordStore::from_config(pg_cfg)?;
            store.ensure_schema().await?;
            Ok(StoreKind::Postgres(store))
        }
    }
}
