use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::validation_record::{RecordKey, ValidationRecord};
use crate::store::RecordStore;

/// Process-local store: (identity, token) -> validated
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    inner: Arc<RwLock<HashMap<RecordKey, bool>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Seed or overwrite a record without going through the cache
    pub async fn insert(&self, key: RecordKey, validated: bool) {
        self.inner.write().await.insert(key, validated);
    }

    pub async fn get(&self, key: &RecordKey) -> Option<bool> {
        self.inner.read().await.get(key).copied()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl RecordStore for InMemoryRecordStore {
    async fn lookup(&self, key: &RecordKey) -> Result<Option<bool>> {
        Ok(self.get(key).await)
    }

    async fn upsert(&self, record: &ValidationRecord) -> Result<()> {
        self.insert(record.key.clone(), record.validated).await;
        Ok(())
    }
}
