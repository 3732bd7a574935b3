//! Query orchestration: refresh if stale, clean, match, escalate misses.

use crate::catalog::refresh::RefreshPipeline;
use crate::catalog::store::CatalogStore;
use crate::catalog::types::DatasetRecord;
use crate::guard::service::AbuseGuard;
use crate::guard::types::Fingerprint;
use crate::search::engine::{find_matches, DEFAULT_SIMILARITY_THRESHOLD};
use crate::search::types::Matches;

use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Words starting with "veri" ("data") carry no meaning in a question about
/// datasets and are removed before matching. `(?i)` alone does not pair the
/// dotted capital `İ` with `i`, so it is listed explicitly.
static STOP_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bver[iİ]\w*\b").expect("stop-word pattern is valid"));

#[derive(Debug, Clone)]
pub struct QuerySettings {
    pub similarity_threshold: f64,
    /// Example records offered when a client keeps missing.
    pub sample_size: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            sample_size: 5,
        }
    }
}

/// What the service made of one question.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// No question, or nothing left after cleaning.
    EmptyQuestion,
    /// The client asked to leave.
    Farewell,
    Found(Matches),
    /// Repeated misses; example topics instead of results.
    Fallback(Vec<DatasetRecord>),
    NotFound,
}

/// Strips stop words and surrounding whitespace. `None` when nothing remains.
pub fn clean_question(raw: &str) -> Option<String> {
    let cleaned = STOP_WORD.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

pub struct QueryService {
    store: Arc<CatalogStore>,
    refresher: Arc<RefreshPipeline>,
    guard: Arc<AbuseGuard>,
    settings: QuerySettings,
}

impl QueryService {
    pub fn new(
        refresher: Arc<RefreshPipeline>,
        guard: Arc<AbuseGuard>,
        settings: QuerySettings,
    ) -> Arc<Self> {
        Arc::new(Self {
            store: refresher.store().clone(),
            refresher,
            guard,
            settings,
        })
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub async fn answer(&self, question: Option<&str>, fingerprint: &Fingerprint) -> QueryOutcome {
        self.refresher.refresh_if_stale().await;

        let Some(query) = question.and_then(clean_question) else {
            return QueryOutcome::EmptyQuestion;
        };

        if query.eq_ignore_ascii_case("q") {
            return QueryOutcome::Farewell;
        }

        let snapshot = self.store.snapshot().await;
        if snapshot.is_empty() {
            // Nothing to match against yet; not the client's fault.
            return QueryOutcome::NotFound;
        }

        let matches = find_matches(&query, &snapshot, self.settings.similarity_threshold);
        if !matches.is_empty() {
            return QueryOutcome::Found(matches);
        }

        if self.guard.record_miss_and_check(fingerprint).await {
            QueryOutcome::Fallback(self.store.sample_records(self.settings.sample_size).await)
        } else {
            QueryOutcome::NotFound
        }
    }
}
