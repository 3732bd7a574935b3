use super::types::{Fingerprint, GuardEntry, GuardSettings};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Counts consecutive unmatched queries per client.
///
/// State is per process and lost on restart; several instances behind a load
/// balancer each count on their own.
pub struct AbuseGuard {
    entries: Mutex<HashMap<Fingerprint, GuardEntry>>,
    settings: GuardSettings,
}

impl AbuseGuard {
    pub fn new(settings: GuardSettings) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            settings,
        })
    }

    /// Records a miss for `fingerprint` and reports whether it crossed the
    /// threshold. Crossing it also forgets the client.
    pub async fn record_miss_and_check(&self, fingerprint: &Fingerprint) -> bool {
        self.record_miss_at(fingerprint, Instant::now()).await
    }

    /// `record_miss_and_check` against an explicit clock reading.
    pub async fn record_miss_at(&self, fingerprint: &Fingerprint, now: Instant) -> bool {
        let mut entries = self.entries.lock().await;
        let window = self.settings.window;

        entries.retain(|_, entry| !entry.is_expired(now, window));

        let Some(entry) = entries.get_mut(fingerprint) else {
            entries.insert(
                fingerprint.clone(),
                GuardEntry {
                    miss_count: 1,
                    last_seen: now,
                },
            );
            return false;
        };

        entry.miss_count += 1;
        entry.last_seen = now;

        if entry.miss_count > self.settings.max_misses {
            tracing::info!(
                "Client {} ({}) exceeded {} misses, sending examples",
                fingerprint.remote_addr,
                fingerprint.user_agent,
                self.settings.max_misses
            );
            entries.remove(fingerprint);
            return true;
        }

        false
    }

    /// Current miss count for `fingerprint`, ignoring expiry.
    pub async fn miss_count(&self, fingerprint: &Fingerprint) -> Option<u32> {
        self.entries
            .lock()
            .await
            .get(fingerprint)
            .map(|entry| entry.miss_count)
    }

    pub async fn tracked_clients(&self) -> usize {
        self.entries.lock().await.len()
    }
}
