use std::time::Duration;
use thiserror::Error;

/// Failure talking to the upstream registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("registry action '{action}' was not successful: {detail}")]
    Unsuccessful { action: String, detail: String },

    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Why a refresh did not produce a snapshot.
///
/// None of these are fatal: the previous snapshot stays in place.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("upstream unavailable: {0}")]
    Upstream(#[from] RegistryError),

    #[error("refresh did not finish within {0:?}")]
    Timeout(Duration),

    #[error("detail worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("detail fetch pool closed")]
    PoolClosed(#[from] tokio::sync::AcquireError),
}
