//! In-memory `Registry` used by the unit tests of several modules.

use super::error::RegistryError;
use super::registry::Registry;
use super::types::DatasetDetail;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub struct FakeRegistry {
    ids: Vec<String>,
    details: HashMap<String, DatasetDetail>,
    delay: Duration,
    /// Earlier ids take longer, so completions arrive in reverse order.
    reverse_delays: bool,
    failing_id: Option<String>,
    fail_list: AtomicBool,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeRegistry {
    pub fn new(details: Vec<(&str, DatasetDetail)>) -> Self {
        Self {
            ids: details.iter().map(|(id, _)| id.to_string()).collect(),
            details: details
                .into_iter()
                .map(|(id, detail)| (id.to_string(), detail))
                .collect(),
            delay: Duration::ZERO,
            reverse_delays: false,
            failing_id: None,
            fail_list: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Records named after `titles`, with ids `ds-0`, `ds-1`, ...
    pub fn with_titles(titles: &[&str]) -> Self {
        let ids: Vec<String> = (0..titles.len()).map(|i| format!("ds-{}", i)).collect();
        Self::new(
            ids.iter()
                .zip(titles)
                .map(|(id, title)| (id.as_str(), detail(title, "", &format!("https://portal/{}", id))))
                .collect(),
        )
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse_delays = true;
        self
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing_id = Some(id.to_string());
        self
    }

    pub fn set_list_failure(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }
}

pub fn detail(title: &str, notes: &str, url: &str) -> DatasetDetail {
    DatasetDetail {
        title: Some(title.to_string()),
        notes: Some(notes.to_string()),
        url: Some(url.to_string()),
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn list_ids(&self) -> Result<Vec<String>, RegistryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable("package_list down".to_string()));
        }
        tokio::time::sleep(self.delay).await;
        Ok(self.ids.clone())
    }

    async fn get_detail(&self, id: &str) -> Result<DatasetDetail, RegistryError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = if self.reverse_delays {
            let position = self.ids.iter().position(|i| i == id).unwrap_or(0);
            self.delay * (self.ids.len() - position) as u32
        } else {
            self.delay
        };
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_id.as_deref() == Some(id) {
            return Err(RegistryError::Unavailable(format!("package_show {} down", id)));
        }
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::Unavailable(format!("unknown id {}", id)))
    }
}
