//! Service Configuration
//!
//! Defaults reproduce the reference deployment against the İzmir open-data
//! portal. Every value can be overridden from a `DATASET_FINDER_*` environment
//! variable; `main` applies command-line flags on top.

use crate::api::service::QuerySettings;
use crate::catalog::refresh::RefreshSettings;
use crate::guard::types::GuardSettings;
use crate::search::engine::DEFAULT_SIMILARITY_THRESHOLD;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const ENV_PREFIX: &str = "DATASET_FINDER_";

/// What `main` should do after reading the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliAction {
    Run,
    Help,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Base URL of the CKAN portal, without the `/api/3/action` suffix.
    pub registry_url: String,
    pub accept_invalid_certs: bool,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
    pub refresh_timeout: Duration,
    pub max_concurrent_fetches: usize,
    pub similarity_threshold: f64,
    pub guard_window: Duration,
    pub max_misses: u32,
    pub sample_size: usize,
    pub data_request_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5650)),
            registry_url: "https://acikveri.bizizmir.com".to_string(),
            accept_invalid_certs: false,
            request_timeout: Duration::from_secs(15),
            refresh_interval: Duration::from_secs(43_200),
            refresh_timeout: Duration::from_secs(120),
            max_concurrent_fetches: 40,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            guard_window: Duration::from_secs(150),
            max_misses: 3,
            sample_size: 5,
            data_request_url: "https://acikveri.bizizmir.com/tr/datarequest/new".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `DATASET_FINDER_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("BIND") {
            config.bind_addr = parse("BIND", &v)?;
        }
        if let Some(v) = var("REGISTRY_URL") {
            config.registry_url = v;
        }
        if let Some(v) = var("ACCEPT_INVALID_CERTS") {
            config.accept_invalid_certs = parse("ACCEPT_INVALID_CERTS", &v)?;
        }
        if let Some(v) = var("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = var("REFRESH_INTERVAL_SECS") {
            config.refresh_interval = Duration::from_secs(parse("REFRESH_INTERVAL_SECS", &v)?);
        }
        if let Some(v) = var("REFRESH_TIMEOUT_SECS") {
            config.refresh_timeout = Duration::from_secs(parse("REFRESH_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = var("MAX_CONCURRENT_FETCHES") {
            config.max_concurrent_fetches = parse("MAX_CONCURRENT_FETCHES", &v)?;
        }
        if let Some(v) = var("SIMILARITY_THRESHOLD") {
            config.similarity_threshold = parse("SIMILARITY_THRESHOLD", &v)?;
        }
        if let Some(v) = var("GUARD_WINDOW_SECS") {
            config.guard_window = Duration::from_secs(parse("GUARD_WINDOW_SECS", &v)?);
        }
        if let Some(v) = var("MAX_MISSES") {
            config.max_misses = parse("MAX_MISSES", &v)?;
        }
        if let Some(v) = var("SAMPLE_SIZE") {
            config.sample_size = parse("SAMPLE_SIZE", &v)?;
        }
        if let Some(v) = var("DATA_REQUEST_URL") {
            config.data_request_url = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies `--bind` and `--registry` from `args` (program name first).
    /// Unknown arguments are logged and skipped; a flag without its value is
    /// an error.
    pub fn apply_args(&mut self, args: &[String]) -> Result<CliAction> {
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = flag_value(args, i)?;
                    self.bind_addr = value
                        .parse::<SocketAddr>()
                        .with_context(|| format!("invalid --bind address: '{}'", value))?;
                    i += 2;
                }
                "--registry" => {
                    self.registry_url = flag_value(args, i)?.to_string();
                    i += 2;
                }
                "--help" | "-h" => return Ok(CliAction::Help),
                other => {
                    tracing::warn!("Ignoring unknown argument '{}'", other);
                    i += 1;
                }
            }
        }
        self.validate()?;
        Ok(CliAction::Run)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_fetches == 0 {
            anyhow::bail!("max_concurrent_fetches must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            anyhow::bail!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            );
        }
        if self.registry_url.trim().is_empty() {
            anyhow::bail!("registry_url must not be empty");
        }
        Ok(())
    }

    pub fn refresh_settings(&self) -> RefreshSettings {
        RefreshSettings {
            interval: self.refresh_interval,
            timeout: self.refresh_timeout,
            max_concurrent_fetches: self.max_concurrent_fetches,
        }
    }

    pub fn guard_settings(&self) -> GuardSettings {
        GuardSettings {
            window: self.guard_window,
            max_misses: self.max_misses,
        }
    }

    pub fn query_settings(&self) -> QuerySettings {
        QuerySettings {
            similarity_threshold: self.similarity_threshold,
            sample_size: self.sample_size,
        }
    }
}

fn flag_value(args: &[String], i: usize) -> Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("missing value for {}", args[i]))
}

fn parse<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("invalid {}{}: '{}'", ENV_PREFIX, name, value))
}
