//! Reconciliation of the local ledger with the remote store.
//!
//! `sync` pushes unsynced local records upstream (at-least-once: a retry
//! after a partial failure re-uploads records that already made it).
//! `fetch_merged` builds one newest-first view from the remote collection
//! plus local records the remote has not seen, and writes it back as the
//! new ledger.
//!
//! Both calls read and then rewrite the ledger; callers must not run them
//! concurrently for the same store.

use super::error::HistoryError;
use super::kv::KeyValueStore;
use super::record::{GameRecord, RemoteGameDoc};
use super::remote::RemoteStore;
use super::store::HistoryStore;
use crate::identity::Identity;
use std::collections::HashSet;

/// Merges one ledger with one identity's remote collection.
pub struct HistoryReconciler<'a, K: KeyValueStore, R: RemoteStore> {
    store: &'a HistoryStore<K>,
    remote: &'a R,
}

impl<'a, K: KeyValueStore, R: RemoteStore> HistoryReconciler<'a, K, R> {
    pub fn new(store: &'a HistoryStore<K>, remote: &'a R) -> Self {
        Self { store, remote }
    }

    /// Upload every unsynced record, then mark the whole ledger synced.
    ///
    /// Returns the number of records uploaded; `0` without touching the
    /// remote store when nothing is pending. If any upload fails the ledger
    /// is left as it was.
    #[tracing::instrument(name = "history.sync", skip_all, fields(uid = %identity.uid))]
    pub async fn sync(&self, identity: &Identity) -> Result<usize, HistoryError> {
        let ledger = self.store.list().await?;
        let pending: Vec<&GameRecord> = ledger.iter().filter(|r| !r.synced).collect();
        let total = pending.len();

        if total == 0 {
            tracing::debug!("nothing to upload");
            return Ok(0);
        }

        for (uploaded, record) in pending.into_iter().enumerate() {
            let doc = RemoteGameDoc::from(record);
            if let Err(source) = self.remote.add(&identity.uid, doc).await {
                tracing::error!(uploaded, total, error = %source, "upload interrupted");
                return Err(HistoryError::PartialUpload {
                    uploaded,
                    total,
                    source,
                });
            }
        }

        self.store.mark_all_synced().await?;
        tracing::info!(uploaded = total, "history synced");
        Ok(total)
    }

    /// The merged history, newest first, also written back as the ledger.
    ///
    /// Local unsynced records whose `completedAt` matches a remote record are
    /// dropped in favour of the remote copy. If the remote read fails the
    /// local ledger is returned unchanged and nothing is written.
    #[tracing::instrument(name = "history.fetch_merged", skip_all, fields(uid = %identity.uid))]
    pub async fn fetch_merged(&self, identity: &Identity) -> Result<Vec<GameRecord>, HistoryError> {
        let remote = match self.remote.list_newest_first(&identity.uid).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "remote history unavailable, showing local history");
                return self.store.list().await;
            }
        };

        let remote: Vec<GameRecord> = remote.into_iter().map(|r| r.into_game_record()).collect();
        let local = self.store.list().await?;
        let merged = merge(local, remote);

        self.store.replace(&merged).await?;
        tracing::debug!(entries = merged.len(), "merged history stored");
        Ok(merged)
    }
}

/// Local unsynced records not already present remotely, followed by the
/// remote records, sorted newest first. The sort is stable, so records
/// sharing a timestamp keep the remote store's order.
fn merge(local: Vec<GameRecord>, remote: Vec<GameRecord>) -> Vec<GameRecord> {
    let remote_times: HashSet<i64> = remote.iter().map(|r| r.completed_at).collect();

    let mut merged: Vec<GameRecord> = local
        .into_iter()
        .filter(|r| !r.synced && !remote_times.contains(&r.completed_at))
        .collect();
    merged.extend(remote);
    merged.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::error::RemoteError;
    use crate::history::kv::MemoryKeyValueStore;
    use crate::history::record::NewGameRecord;
    use crate::history::remote::MemoryRemoteStore;
    use crate::puzzle::Difficulty;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Log output captured from a test run.
    #[derive(Clone, Default)]
    struct CapturedLogs {
        logs: Arc<Mutex<Vec<u8>>>,
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.logs.lock().unwrap()).to_string()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.logs.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` on a fresh runtime with a subscriber writing into a buffer.
    fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future,
    {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(f())
        });

        (logs.contents(), result)
    }

    fn finished(completed_at: i64) -> NewGameRecord {
        NewGameRecord {
            difficulty: Difficulty::Easy,
            score: 700,
            time_seconds: 200,
            mistakes: 2,
            completed_at,
        }
    }

    fn doc(completed_at: i64) -> RemoteGameDoc {
        RemoteGameDoc {
            difficulty: Difficulty::Hard,
            score: 1500,
            time_seconds: 90,
            mistakes: 0,
            completed_at,
        }
    }

    fn me() -> Identity {
        Identity::new("uid-1", None)
    }

    fn record(id: &str, completed_at: i64, synced: bool) -> GameRecord {
        GameRecord {
            id: id.to_string(),
            difficulty: Difficulty::Medium,
            score: 1,
            time_seconds: 1,
            mistakes: 0,
            completed_at,
            synced,
        }
    }

    #[tokio::test]
    async fn sync_uploads_unsynced_and_marks_ledger() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();
        store.append(finished(1_000)).await.unwrap();
        store.append(finished(2_000)).await.unwrap();

        let uploaded = HistoryReconciler::new(&store, &remote)
            .sync(&me())
            .await
            .unwrap();

        assert_eq!(uploaded, 2);
        assert_eq!(remote.documents("uid-1").await.len(), 2);
        assert!(store.list().await.unwrap().iter().all(|r| r.synced));
    }

    #[tokio::test]
    async fn sync_with_nothing_pending_makes_no_remote_call() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();

        let uploaded = HistoryReconciler::new(&store, &remote)
            .sync(&me())
            .await
            .unwrap();

        assert_eq!(uploaded, 0);
        assert_eq!(remote.add_calls(), 0);
    }

    #[tokio::test]
    async fn second_sync_uploads_nothing() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();
        store.append(finished(1_000)).await.unwrap();
        let reconciler = HistoryReconciler::new(&store, &remote);

        assert_eq!(reconciler.sync(&me()).await.unwrap(), 1);
        assert_eq!(reconciler.sync(&me()).await.unwrap(), 0);
        assert_eq!(remote.add_calls(), 1);
    }

    #[tokio::test]
    async fn partial_failure_leaves_ledger_unsynced() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();
        for t in [1_000, 2_000, 3_000] {
            store.append(finished(t)).await.unwrap();
        }
        remote.fail_writes_after(2).await;
        let reconciler = HistoryReconciler::new(&store, &remote);

        let err = reconciler.sync(&me()).await.unwrap_err();
        match err {
            HistoryError::PartialUpload {
                uploaded,
                total,
                source,
            } => {
                assert_eq!(uploaded, 2);
                assert_eq!(total, 3);
                assert!(matches!(source, RemoteError::Write(_)));
            }
            other => panic!("expected PartialUpload, got {other:?}"),
        }
        assert!(store.list().await.unwrap().iter().all(|r| !r.synced));
        assert_eq!(remote.documents("uid-1").await.len(), 2);

        // a retry re-uploads the two that already made it
        remote.heal_writes().await;
        assert_eq!(reconciler.sync(&me()).await.unwrap(), 3);
        assert_eq!(remote.documents("uid-1").await.len(), 5);
    }

    #[tokio::test]
    async fn sync_marks_entire_ledger_including_already_synced() {
        let kv = MemoryKeyValueStore::new();
        let store = HistoryStore::new(kv);
        let remote = MemoryRemoteStore::new();
        store
            .replace(&[record("a", 2_000, false), record("b", 1_000, true)])
            .await
            .unwrap();

        let uploaded = HistoryReconciler::new(&store, &remote)
            .sync(&me())
            .await
            .unwrap();

        assert_eq!(uploaded, 1);
        assert!(store.list().await.unwrap().iter().all(|r| r.synced));
    }

    #[tokio::test]
    async fn fetch_merged_prefers_remote_on_timestamp_match() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();
        let local = store.append(finished(5_000)).await.unwrap();
        let remote_id = remote.seed("uid-1", doc(5_000)).await;

        let merged = HistoryReconciler::new(&store, &remote)
            .fetch_merged(&me())
            .await
            .unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, remote_id);
        assert_ne!(merged[0].id, local.id);
        assert!(merged[0].synced);
        assert_eq!(merged[0].score, 1500);
    }

    #[tokio::test]
    async fn fetch_merged_interleaves_and_writes_back() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();
        store.append(finished(2_000)).await.unwrap();
        store.append(finished(4_000)).await.unwrap();
        remote.seed("uid-1", doc(1_000)).await;
        remote.seed("uid-1", doc(3_000)).await;

        let merged = HistoryReconciler::new(&store, &remote)
            .fetch_merged(&me())
            .await
            .unwrap();

        let times: Vec<i64> = merged.iter().map(|r| r.completed_at).collect();
        assert_eq!(times, vec![4_000, 3_000, 2_000, 1_000]);
        let synced: Vec<bool> = merged.iter().map(|r| r.synced).collect();
        assert_eq!(synced, vec![false, true, false, true]);
        assert_eq!(store.list().await.unwrap(), merged);
    }

    #[tokio::test]
    async fn fetch_merged_drops_local_synced_records_missing_remotely() {
        let store = HistoryStore::new(MemoryKeyValueStore::new());
        let remote = MemoryRemoteStore::new();
        store
            .replace(&[record("stale", 9_000, true), record("fresh", 8_000, false)])
            .await
            .unwrap();

        let merged = HistoryReconciler::new(&store, &remote)
            .fetch_merged(&me())
            .await
            .unwrap();

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["fresh"]);
    }

    #[tokio::test]
    async fn fetch_failure_falls_back_to_local_without_writing() {
        let kv = MemoryKeyValueStore::new();
        let store = HistoryStore::new(kv.clone());
        let remote = MemoryRemoteStore::new();
        store
            .replace(&[record("synced-only", 9_000, true)])
            .await
            .unwrap();
        remote.fail_reads(true);

        let view = HistoryReconciler::new(&store, &remote)
            .fetch_merged(&me())
            .await
            .unwrap();

        assert_eq!(view, vec![record("synced-only", 9_000, true)]);
        assert_eq!(store.list().await.unwrap(), view);
    }

    #[test]
    fn merge_keeps_remote_order_for_equal_timestamps() {
        let remote = vec![
            record("r1", 5_000, true),
            record("r2", 5_000, true),
            record("r3", 1_000, true),
        ];
        let local = vec![record("l1", 5_000, false), record("l2", 3_000, false)];

        let ids: Vec<String> = merge(local, remote).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r1", "r2", "l2", "r3"]);
    }

    #[test]
    fn fetch_fallback_is_logged_as_warning() {
        let (logs, view) = with_tracing(|| async {
            let store = HistoryStore::new(MemoryKeyValueStore::new());
            let remote = MemoryRemoteStore::new();
            remote.fail_reads(true);
            let view = HistoryReconciler::new(&store, &remote)
                .fetch_merged(&me())
                .await;
            view
        });

        assert!(view.unwrap().is_empty());
        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("remote history unavailable"), "logs: {logs}");
        assert!(logs.contains("uid-1"), "logs: {logs}");
    }

    #[test]
    fn interrupted_upload_is_logged_as_error() {
        let (logs, result) = with_tracing(|| async {
            let store = HistoryStore::new(MemoryKeyValueStore::new());
            let remote = MemoryRemoteStore::new();
            store.append(finished(1_000)).await.unwrap();
            store.append(finished(2_000)).await.unwrap();
            remote.fail_writes_after(1).await;
            let result = HistoryReconciler::new(&store, &remote).sync(&me()).await;
            result
        });

        assert!(result.is_err());
        assert!(logs.contains("ERROR"), "logs: {logs}");
        assert!(logs.contains("upload interrupted"), "logs: {logs}");
        assert!(logs.contains("uploaded=1"), "logs: {logs}");
    }
}
