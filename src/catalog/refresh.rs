//! Catalog Refresh Pipeline
//!
//! Rebuilds the catalog from the upstream registry and installs it into the
//! `CatalogStore`.
//!
//! ## Workflow
//! 1. **List**: Fetch every dataset id.
//! 2. **Fan-out**: Fetch each detail on its own task, with at most
//!    `max_concurrent_fetches` requests in flight.
//! 3. **Assemble**: Map details to records in upstream id order and build the
//!    similarity index.
//! 4. **Publish**: Swap the new snapshot in as a single step.
//!
//! Any failure aborts the whole refresh and leaves the previous snapshot in
//! place. Only one refresh runs at a time.

use super::error::RefreshError;
use super::registry::Registry;
use super::store::CatalogStore;
use super::types::{DatasetRecord, Snapshot};

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub struct RefreshSettings {
    /// Age after which the current snapshot is considered stale.
    pub interval: Duration,
    /// Upper bound for one complete refresh.
    pub timeout: Duration,
    pub max_concurrent_fetches: usize,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(12 * 60 * 60),
            timeout: Duration::from_secs(120),
            max_concurrent_fetches: 40,
        }
    }
}

/// Result of `refresh_if_stale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// The current snapshot is young enough; nothing was fetched.
    Fresh,
    /// A new snapshot with this many records was installed.
    Refreshed(usize),
    /// Another refresh holds the lock; the caller keeps the current snapshot.
    InProgress,
    /// The refresh failed and the previous snapshot was kept.
    Failed,
}

pub struct RefreshPipeline {
    registry: Arc<dyn Registry>,
    store: Arc<CatalogStore>,
    settings: RefreshSettings,
    in_flight: Mutex<()>,
}

impl RefreshPipeline {
    pub fn new(
        registry: Arc<dyn Registry>,
        store: Arc<CatalogStore>,
        settings: RefreshSettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            store,
            settings,
            in_flight: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Refreshes unconditionally, waiting for any refresh already running.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        let _guard = self.in_flight.lock().await;
        self.run_refresh().await
    }

    /// Refreshes when the current snapshot is older than the interval.
    ///
    /// Never waits for a refresh started by someone else and never returns an
    /// error: failures are logged and the previous snapshot keeps serving.
    pub async fn refresh_if_stale(&self) -> RefreshStatus {
        if !self.store.snapshot().await.is_stale(self.settings.interval) {
            return RefreshStatus::Fresh;
        }

        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::debug!("Refresh already in progress, serving current snapshot");
                return RefreshStatus::InProgress;
            }
        };

        // Whoever held the lock before us may have just refreshed.
        if !self.store.snapshot().await.is_stale(self.settings.interval) {
            return RefreshStatus::Fresh;
        }

        match self.run_refresh().await {
            Ok(snapshot) => RefreshStatus::Refreshed(snapshot.len()),
            Err(e) => {
                tracing::warn!("Catalog refresh failed, keeping previous snapshot: {}", e);
                RefreshStatus::Failed
            }
        }
    }

    async fn run_refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        let started = Instant::now();
        let snapshot = tokio::time::timeout(self.settings.timeout, self.fetch_snapshot())
            .await
            .map_err(|_| RefreshError::Timeout(self.settings.timeout))??;

        tracing::info!(
            "Fetched {} datasets in {:?}",
            snapshot.len(),
            started.elapsed()
        );
        Ok(self.store.install(snapshot).await)
    }

    /// Fetches and assembles a snapshot without publishing it.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, RefreshError> {
        let ids = self.registry.list_ids().await?;
        tracing::info!("Registry lists {} datasets", ids.len());

        let records = self.fetch_details(ids).await?;
        Ok(Snapshot::new(records))
    }

    async fn fetch_details(&self, ids: Vec<String>) -> Result<Vec<DatasetRecord>, RefreshError> {
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrent_fetches.max(1)));
        let mut slots: Vec<Option<DatasetRecord>> = vec![None; ids.len()];
        let mut workers = JoinSet::new();

        for (position, id) in ids.into_iter().enumerate() {
            // Fail fast on anything that already finished badly.
            while let Some(joined) = workers.try_join_next() {
                let (done, record) = joined??;
                slots[done] = Some(record);
            }

            let permit = semaphore.clone().acquire_owned().await?;
            let registry = self.registry.clone();
            workers.spawn(async move {
                let _permit = permit;
                let detail = registry.get_detail(&id).await.map_err(|e| {
                    tracing::debug!("Detail fetch for '{}' failed: {}", id, e);
                    e
                })?;
                Ok::<_, RefreshError>((position, DatasetRecord::from(detail)))
            });
        }

        while let Some(joined) = workers.join_next().await {
            let (done, record) = joined??;
            slots[done] = Some(record);
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
