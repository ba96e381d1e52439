//! Remote document store capability.
//!
//! Each identity owns a collection of history documents. The store assigns
//! document ids; records are correlated with the local ledger by
//! `completedAt`, never by id.

use super::error::RemoteError;
use super::record::{RemoteGameDoc, RemoteRecord};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Add a document to `uid`'s collection; returns the store-assigned id.
    async fn add(&self, uid: &str, doc: RemoteGameDoc) -> Result<String, RemoteError>;

    /// All of `uid`'s documents, newest `completedAt` first.
    async fn list_newest_first(&self, uid: &str) -> Result<Vec<RemoteRecord>, RemoteError>;
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Arc<T> {
    async fn add(&self, uid: &str, doc: RemoteGameDoc) -> Result<String, RemoteError> {
        (**self).add(uid, doc).await
    }

    async fn list_newest_first(&self, uid: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        (**self).list_newest_first(uid).await
    }
}

/// In-memory remote store. Clones share the same collections.
///
/// Writes can be made to fail after a number of successes, and reads can be
/// made to fail, to exercise reconciliation error paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemoteStore {
    collections: Arc<Mutex<HashMap<String, Vec<RemoteRecord>>>>,
    next_id: Arc<AtomicUsize>,
    add_calls: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
    writes_before_failure: Arc<Mutex<Option<usize>>>,
    fail_reads: Arc<AtomicBool>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `n` more writes succeed, then fail every write.
    pub async fn fail_writes_after(&self, n: usize) {
        *self.writes_before_failure.lock().await = Some(n);
    }

    /// Stop failing writes.
    pub async fn heal_writes(&self) {
        *self.writes_before_failure.lock().await = None;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of `add` calls made, successful or not.
    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_newest_first` calls made, successful or not.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Insert a document directly, bypassing failure injection.
    pub async fn seed(&self, uid: &str, doc: RemoteGameDoc) -> String {
        let id = self.allocate_id();
        self.collections
            .lock()
            .await
            .entry(uid.to_string())
            .or_default()
            .push(RemoteRecord {
                id: id.clone(),
                doc,
            });
        id
    }

    /// Documents in insertion order.
    pub async fn documents(&self, uid: &str) -> Vec<RemoteRecord> {
        self.collections
            .lock()
            .await
            .get(uid)
            .cloned()
            .unwrap_or_default()
    }

    fn allocate_id(&self) -> String {
        format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn add(&self, uid: &str, doc: RemoteGameDoc) -> Result<String, RemoteError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);

        {
            let mut budget = self.writes_before_failure.lock().await;
            match budget.as_mut() {
                Some(0) => return Err(RemoteError::Write("injected failure".to_string())),
                Some(remaining) => *remaining -= 1,
                None => {}
            }
        }

        Ok(self.seed(uid, doc).await)
    }

    async fn list_newest_first(&self, uid: &str) -> Result<Vec<RemoteRecord>, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RemoteError::Read("injected failure".to_string()));
        }

        let mut records = self.documents(uid).await;
        // stable: equal timestamps keep insertion order
        records.sort_by_key(|r| Reverse(r.doc.completed_at));
        Ok(records)
    }
}
