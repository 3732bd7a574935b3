use super::types::{DatasetRecord, Snapshot};

use std::sync::Arc;
use tokio::sync::RwLock;

/// Owner of the current catalog snapshot.
///
/// Readers take a cheap `Arc` clone and release the lock immediately, so a
/// query keeps working on the snapshot it started with even if a refresh
/// installs a new one meanwhile.
pub struct CatalogStore {
    current: RwLock<Arc<Snapshot>>,
}

impl CatalogStore {
    /// Creates a store holding the empty bootstrap snapshot.
    pub fn new() -> Arc<Self> {
        Self::with_snapshot(Snapshot::empty())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Arc<Self> {
        Arc::new(Self {
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Replaces the current snapshot in one step and returns the new one.
    pub async fn install(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().await;
        *current = snapshot.clone();
        tracing::info!("Installed catalog snapshot with {} records", snapshot.len());
        snapshot
    }

    /// First `n` records of the current snapshot.
    pub async fn sample_records(&self, n: usize) -> Vec<DatasetRecord> {
        self.snapshot().await.sample(n)
    }

    pub async fn record_count(&self) -> usize {
        self.snapshot().await.len()
    }
}
