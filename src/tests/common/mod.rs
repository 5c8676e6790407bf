// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::cache::validation_record::{RecordKey, ValidationRecord};
use crate::oracle::ValidationOracle;
use crate::store::memory::InMemoryRecordStore;
use crate::store::RecordStore;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Oracle answering from a queue of scripted verdicts; an empty queue is an error.
#[derive(Default)]
pub struct ScriptedOracle {
    answers: Mutex<VecDeque<Result<bool>>>,
    seen: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(answers: Vec<Result<bool>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn push(&self, answer: Result<bool>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl ValidationOracle for ScriptedOracle {
    async fn validate_token(&self, token: &str) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(token.to_owned());
        let answer = self.answers.lock().unwrap().pop_front();
        answer.unwrap_or_else(|| Err(anyhow!("no scripted answer for '{}'", token)))
    }
}

/// In-memory store whose lookups and writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryRecordStore,
    fail_lookup: AtomicBool,
    fail_upsert: AtomicBool,
    upserts: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    pub fn fail_upsert(&self, fail: bool) {
        self.fail_upsert.store(fail, Ordering::SeqCst);
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, identity: i64, token: &str, validated: bool) {
        self.inner.insert(RecordKey::new(identity, token), validated).await;
    }

    pub async fn get(&self, identity: i64, token: &str) -> Option<bool> {
        self.inner.get(&RecordKey::new(identity, token)).await
    }
}

impl RecordStore for FlakyStore {
    async fn lookup(&self, key: &RecordKey) -> Result<Option<bool>> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(anyhow!("connection refused"));
        }
        self.inner.lookup(key).await
    }

    async fn upsert(&self, record: &ValidationRecord) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        self.inner.upsert(record).await
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
