//! Upstream Registry Client
//!
//! The refresh pipeline only needs two calls from the open-data portal: the
//! list of package ids and the detail of one package. `Registry` is the seam
//! between the two so the pipeline can be driven by an in-memory fake in tests.

use super::error::RegistryError;
use super::types::{CkanResponse, DatasetDetail};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[async_trait]
pub trait Registry: Send + Sync {
    /// Every dataset id currently published.
    async fn list_ids(&self) -> Result<Vec<String>, RegistryError>;

    /// Title, notes and url of a single dataset.
    async fn get_detail(&self, id: &str) -> Result<DatasetDetail, RegistryError>;
}

/// HTTP client for a CKAN action API (`/api/3/action/...`).
pub struct CkanRegistry {
    base_url: String,
    http_client: reqwest::Client,
    request_timeout: Duration,
    attempts: usize,
}

impl CkanRegistry {
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, RegistryError> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            request_timeout,
            attempts: 3,
        })
    }

    pub fn package_list_url(&self) -> String {
        format!("{}/api/3/action/package_list", self.base_url)
    }

    pub fn package_show_url(&self) -> String {
        format!("{}/api/3/action/package_show", self.base_url)
    }

    async fn call_action<T: DeserializeOwned>(
        &self,
        action: &str,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, RegistryError> {
        let response = self.get_with_retry(&url, query).await?;
        let envelope: CkanResponse<T> = response.error_for_status()?.json().await?;
        unwrap_envelope(action, envelope)
    }

    /// GET with capped exponential backoff and jitter between attempts.
    async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, RegistryError> {
        let mut delay_ms = 150u64;

        for attempt in 0..self.attempts {
            let response = self
                .http_client
                .get(url)
                .query(query)
                .timeout(self.request_timeout)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == self.attempts {
                        return Err(e.into());
                    }
                    tracing::debug!("GET {} failed (attempt {}): {}", url, attempt + 1, e);
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(RegistryError::Unavailable(format!(
            "retry attempts exhausted for {}",
            url
        )))
    }
}

#[async_trait]
impl Registry for CkanRegistry {
    async fn list_ids(&self) -> Result<Vec<String>, RegistryError> {
        self.call_action("package_list", self.package_list_url(), &[])
            .await
    }

    async fn get_detail(&self, id: &str) -> Result<DatasetDetail, RegistryError> {
        self.call_action("package_show", self.package_show_url(), &[("id", id)])
            .await
    }
}

/// Extracts `result` from a CKAN envelope, treating `success: false` or a
/// missing result as a failed call.
pub fn unwrap_envelope<T>(action: &str, envelope: CkanResponse<T>) -> Result<T, RegistryError> {
    if !envelope.success {
        let detail = envelope
            .error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no error detail".to_string());
        return Err(RegistryError::Unsuccessful {
            action: action.to_string(),
            detail,
        });
    }

    envelope.result.ok_or_else(|| RegistryError::Unsuccessful {
        action: action.to_string(),
        detail: "missing result".to_string(),
    })
}
