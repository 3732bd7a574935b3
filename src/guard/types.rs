use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Identifies a client without any persistent identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub user_agent: String,
    pub remote_addr: String,
}

impl Fingerprint {
    pub fn new(user_agent: impl Into<String>, remote_addr: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            remote_addr: remote_addr.into(),
        }
    }
}

/// Miss history of one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardEntry {
    pub miss_count: u32,
    pub last_seen: Instant,
}

impl GuardEntry {
    /// True once `window` has passed since the last miss.
    pub fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= window
    }
}

#[derive(Debug, Clone)]
pub struct GuardSettings {
    /// Inactivity after which a client's misses are forgotten.
    pub window: Duration,
    /// Misses tolerated before the fallback triggers on the next one.
    pub max_misses: u32,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(150),
            max_misses: 3,
        }
    }
}
