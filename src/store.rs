//! The shared history store.
//!
//! A [`HistoryStore`] is a cheap `Clone` handle. Every handle talks to the same
//! backend and publishes the same snapshot, so the search screen can append a
//! lookup while the history screen reads from its own handle.

use crate::error::HistoryResult;
use crate::persistence::HistoryBackend;
use crate::record::LocationRecord;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Ordered, read-only view of the history at one point in time.
pub type Snapshot = Arc<[LocationRecord]>;

/// What happened to the result of a [`HistoryStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The snapshot was replaced and now holds this many records.
    Applied(usize),
    /// A newer operation had already published; this result was discarded.
    Superseded,
}

/// Injectable, process-wide history container.
#[derive(Clone)]
pub struct HistoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn HistoryBackend>,
    /// Last issued request token. Tokens grow with dispatch order.
    issued: AtomicU64,
    /// Token of the newest operation that has published a snapshot.
    applied: Mutex<u64>,
    /// Serializes backend writes so a read-modify-write never interleaves
    /// with another write.
    write_lock: tokio::sync::Mutex<()>,
    snapshot: watch::Sender<Snapshot>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("records", &self.current_snapshot().len())
            .field("issued", &self.inner.issued.load(Ordering::Relaxed))
            .finish()
    }
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::from(Vec::new()));
        Self {
            inner: Arc::new(Inner {
                backend,
                issued: AtomicU64::new(0),
                applied: Mutex::new(0),
                write_lock: tokio::sync::Mutex::new(()),
                snapshot,
            }),
        }
    }

    /// Latest known snapshot. Empty until something has been loaded.
    pub fn current_snapshot(&self) -> Snapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Receiver notified once per published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot.subscribe()
    }

    /// Repopulates the snapshot from the backend.
    ///
    /// The request token is taken when `load` is called, not when the returned
    /// future is first polled. A read that completes after a newer operation
    /// has already published is dropped and reported as
    /// [`LoadOutcome::Superseded`]. On error the snapshot is left as it was.
    pub fn load(&self) -> impl Future<Output = HistoryResult<LoadOutcome>> + Send + 'static {
        let inner = Arc::clone(&self.inner);
        let token = inner.next_token();
        async move {
            debug!(token, "Loading history");
            let records = inner.backend.read_all().await.inspect_err(|e| {
                warn!(token, "History load failed: {}", e);
            })?;

            let mut applied = inner.applied_token();
            if token <= *applied {
                debug!(token, applied = *applied, "Discarding superseded history load");
                return Ok(LoadOutcome::Superseded);
            }
            *applied = token;
            let len = records.len();
            inner.snapshot.send_replace(Snapshot::from(records));
            info!(token, "Loaded {} history record(s)", len);
            Ok(LoadOutcome::Applied(len))
        }
    }

    /// Appends a lookup to the persisted history and publishes the result.
    ///
    /// The stored history is re-read first so a store that was never loaded
    /// does not overwrite what is on disk. Appends and clears are applied one
    /// at a time, in the order they take the write lock.
    pub fn append(&self, record: LocationRecord) -> impl Future<Output = HistoryResult<Snapshot>> + Send + 'static {
        let inner = Arc::clone(&self.inner);
        let token = inner.next_token();
        async move {
            let _write = inner.write_lock.lock().await;
            let mut records = inner.backend.read_all().await?;
            records.push(record);
            inner.backend.write_all(&records).await.inspect_err(|e| {
                warn!(token, "History append failed: {}", e);
            })?;

            let snapshot = Snapshot::from(records);
            inner.publish_write(token, snapshot.clone());
            info!(token, "Appended lookup, history now has {} record(s)", snapshot.len());
            Ok(snapshot)
        }
    }

    /// Empties the backend, then the snapshot.
    ///
    /// Clearing an empty history is a no-op that does not touch the backend.
    /// When the backend write fails the snapshot is not emptied.
    pub fn clear(&self) -> impl Future<Output = HistoryResult<()>> + Send + 'static {
        let inner = Arc::clone(&self.inner);
        let already_empty = inner.snapshot.borrow().is_empty();
        let token = if already_empty { 0 } else { inner.next_token() };
        async move {
            if already_empty {
                debug!("History already empty, nothing to clear");
                return Ok(());
            }

            let _write = inner.write_lock.lock().await;
            inner.backend.write_all(&[]).await.inspect_err(|e| {
                warn!(token, "History clear failed: {}", e);
            })?;

            inner.publish_write(token, Snapshot::from(Vec::new()));
            info!(token, "Cleared history");
            Ok(())
        }
    }
}

impl Inner {
    fn next_token(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn applied_token(&self) -> MutexGuard<'_, u64> {
        // The guarded value is a plain counter, a poisoned lock still holds a valid one.
        self.applied.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publishes the result of a completed write.
    ///
    /// The backend now holds exactly `snapshot`, so it is published even if a
    /// newer load already landed. Older loads still in flight are fenced off by
    /// raising the applied token.
    fn publish_write(&self, token: u64, snapshot: Snapshot) {
        let mut applied = self.applied_token();
        *applied = (*applied).max(token);
        self.snapshot.send_replace(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoryError;
    use crate::persistence::MemoryBackend;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    fn names(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.iter().map(|r| r.name.as_str()).collect()
    }

    fn store_with(names: &[&str]) -> HistoryStore {
        let records = names.iter().map(|n| LocationRecord::new(*n)).collect();
        HistoryStore::new(Arc::new(MemoryBackend::with_records(records)))
    }

    /// Backend whose reads and writes can be switched to fail.
    #[derive(Default)]
    struct FlakyBackend {
        memory: MemoryBackend,
        fail_reads: std::sync::atomic::AtomicBool,
        fail_writes: std::sync::atomic::AtomicBool,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl HistoryBackend for FlakyBackend {
        async fn read_all(&self) -> HistoryResult<Vec<LocationRecord>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(HistoryError::PersistenceRead("disk on fire".to_string()));
            }
            self.memory.read_all().await
        }

        async fn write_all(&self, records: &[LocationRecord]) -> HistoryResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(HistoryError::PersistenceWrite("read-only".to_string()));
            }
            self.memory.write_all(records).await
        }
    }

    #[test]
    fn test_snapshot_is_empty_before_first_load() {
        let store = store_with(&["Taipei"]);
        assert!(store.current_snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_load_publishes_exact_sequence() {
        let store = store_with(&["Taipei", "Tainan", "Taipei"]);

        let outcome = store.load().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Applied(3));
        assert_eq!(names(&store.current_snapshot()), ["Taipei", "Tainan", "Taipei"]);
    }

    #[tokio::test]
    async fn test_load_notifies_subscribers_once() {
        let store = store_with(&["Taipei", "Tainan"]);
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.load().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 2);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_the_snapshot() {
        let store = store_with(&["Keelung"]);
        let other = store.clone();
        store.load().await.unwrap();
        assert_eq!(names(&other.current_snapshot()), ["Keelung"]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let backend = Arc::new(FlakyBackend::default());
        backend.memory.write_all(&[LocationRecord::new("Yilan")]).await.unwrap();
        let store = HistoryStore::new(backend.clone());
        store.load().await.unwrap();

        backend.fail_reads.store(true, Ordering::SeqCst);
        let result = store.load().await;

        assert!(matches!(result, Err(HistoryError::PersistenceRead(_))));
        assert_eq!(names(&store.current_snapshot()), ["Yilan"]);
    }

    #[tokio::test]
    async fn test_clear_empties_backend_and_snapshot() {
        let backend = Arc::new(MemoryBackend::with_records(vec![LocationRecord::new("Hualien")]));
        let store = HistoryStore::new(backend.clone());
        store.load().await.unwrap();

        store.clear().await.unwrap();

        assert!(store.current_snapshot().is_empty());
        assert!(backend.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_on_empty_is_silent_noop() {
        let backend = Arc::new(FlakyBackend::default());
        backend.fail_writes.store(true, Ordering::SeqCst);
        let store = HistoryStore::new(backend.clone());
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        assert!(store.clear().await.is_ok());
        assert!(store.clear().await.is_ok());

        assert_eq!(backend.writes.load(Ordering::SeqCst), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_snapshot() {
        let backend = Arc::new(FlakyBackend::default());
        backend.memory.write_all(&[LocationRecord::new("Taitung")]).await.unwrap();
        let store = HistoryStore::new(backend.clone());
        store.load().await.unwrap();

        backend.fail_writes.store(true, Ordering::SeqCst);
        let result = store.clear().await;

        assert!(matches!(result, Err(HistoryError::PersistenceWrite(_))));
        assert_eq!(names(&store.current_snapshot()), ["Taitung"]);
    }

    #[tokio::test]
    async fn test_append_persists_after_existing_records() {
        let backend = Arc::new(MemoryBackend::with_records(vec![LocationRecord::new("Penghu")]));
        let store = HistoryStore::new(backend.clone());

        // Never loaded: append must not drop what is already stored.
        let snapshot = store.append(LocationRecord::new("Kinmen")).await.unwrap();

        assert_eq!(names(&snapshot), ["Penghu", "Kinmen"]);
        assert_eq!(names(&store.current_snapshot()), ["Penghu", "Kinmen"]);
        assert_eq!(backend.read_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_append_changes_nothing() {
        let backend = Arc::new(FlakyBackend::default());
        let store = HistoryStore::new(backend.clone());
        backend.fail_writes.store(true, Ordering::SeqCst);

        let result = store.append(LocationRecord::new("Chiayi")).await;

        assert!(result.is_err());
        assert!(store.current_snapshot().is_empty());
        assert!(backend.memory.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_dispatched_before_clear_cannot_resurrect_history() {
        let store = store_with(&["Nantou"]);
        store.load().await.unwrap();

        let stale = store.load();
        store.clear().await.unwrap();

        assert_eq!(stale.await.unwrap(), LoadOutcome::Superseded);
        assert!(store.current_snapshot().is_empty());
    }

    /// Backend that yields to other tasks between a read and the next write.
    #[derive(Default)]
    struct YieldingBackend {
        memory: MemoryBackend,
    }

    #[async_trait]
    impl HistoryBackend for YieldingBackend {
        async fn read_all(&self) -> HistoryResult<Vec<LocationRecord>> {
            let records = self.memory.read_all().await;
            tokio::task::yield_now().await;
            records
        }

        async fn write_all(&self, records: &[LocationRecord]) -> HistoryResult<()> {
            tokio::task::yield_now().await;
            self.memory.write_all(records).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_every_lookup() {
        let backend = Arc::new(YieldingBackend::default());
        let store = HistoryStore::new(backend.clone());

        let (first, second) = tokio::join!(
            store.append(LocationRecord::new("Keelung")),
            store.append(LocationRecord::new("Hualien"))
        );
        first.unwrap();
        second.unwrap();

        let stored = backend.memory.read_all().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(names(&store.current_snapshot()), ["Keelung", "Hualien"]);
    }

    #[tokio::test]
    async fn test_append_overlapping_clear_leaves_disk_and_snapshot_in_step() {
        let backend = Arc::new(YieldingBackend {
            memory: MemoryBackend::with_records(vec![LocationRecord::new("Keelung")]),
        });
        let store = HistoryStore::new(backend.clone());
        store.load().await.unwrap();

        let (appended, cleared) = tokio::join!(store.append(LocationRecord::new("Hualien")), store.clear());
        appended.unwrap();
        cleared.unwrap();

        assert!(backend.memory.read_all().await.unwrap().is_empty());
        assert!(store.current_snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_append_keeps_only_new_lookup() {
        let backend = Arc::new(YieldingBackend {
            memory: MemoryBackend::with_records(vec![LocationRecord::new("Keelung")]),
        });
        let store = HistoryStore::new(backend.clone());
        store.load().await.unwrap();

        let (cleared, appended) = tokio::join!(store.clear(), store.append(LocationRecord::new("Hualien")));
        cleared.unwrap();
        appended.unwrap();

        let stored = backend.memory.read_all().await.unwrap();
        assert_eq!(stored, vec![LocationRecord::new("Hualien")]);
        assert_eq!(names(&store.current_snapshot()), ["Hualien"]);
    }
}
