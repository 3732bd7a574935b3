//! Catalog Data Types
//!
//! Dataset records, the snapshot that bundles them with their similarity index,
//! and the CKAN payloads they are built from.

use crate::search::index::SimilarityIndex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One dataset as shown to users.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetRecord {
    pub name: String,
    pub explanation: String,
    pub address: String,
}

impl DatasetRecord {
    pub fn new(
        name: impl Into<String>,
        explanation: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            explanation: explanation.into(),
            address: address.into(),
        }
    }
}

/// Detail of a single package as returned by `package_show`.
///
/// Every field may be null upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetDetail {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
}

impl From<DatasetDetail> for DatasetRecord {
    fn from(detail: DatasetDetail) -> Self {
        Self {
            name: detail.title.unwrap_or_default(),
            explanation: detail.notes.unwrap_or_default(),
            address: detail.url.unwrap_or_default(),
        }
    }
}

/// Envelope wrapped around every CKAN action response.
#[derive(Debug, Deserialize)]
pub struct CkanResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Immutable point-in-time view of the catalog.
///
/// The index is built from exactly `records`, and the two are only ever
/// replaced together.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub records: Vec<DatasetRecord>,
    pub index: SimilarityIndex,
    /// When the snapshot was fetched. `None` for the empty bootstrap snapshot.
    pub built_at: Option<Instant>,
}

impl Snapshot {
    /// Builds a snapshot and its name index from `records`.
    pub fn new(records: Vec<DatasetRecord>) -> Self {
        let index = SimilarityIndex::build(records.iter().map(|r| r.name.as_str()));
        Self {
            records,
            index,
            built_at: Some(Instant::now()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the snapshot was never fetched or is older than `interval`.
    pub fn is_stale(&self, interval: Duration) -> bool {
        match self.built_at {
            Some(built_at) => built_at.elapsed() > interval,
            None => true,
        }
    }

    /// First `n` records, used as example topics.
    pub fn sample(&self, n: usize) -> Vec<DatasetRecord> {
        self.records.iter().take(n).cloned().collect()
    }
}
