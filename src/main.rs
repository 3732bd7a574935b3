use dataset_finder::api::handlers::router;
use dataset_finder::api::service::QueryService;
use dataset_finder::catalog::refresh::RefreshPipeline;
use dataset_finder::catalog::registry::CkanRegistry;
use dataset_finder::catalog::store::CatalogStore;
use dataset_finder::config::{CliAction, Config};
use dataset_finder::guard::service::AbuseGuard;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::from_env()?;

    let args: Vec<String> = std::env::args().collect();
    if config.apply_args(&args)? == CliAction::Help {
        eprintln!("Usage: {} [--bind <addr:port>] [--registry <url>]", args[0]);
        eprintln!("Example: {} --bind 127.0.0.1:5650", args[0]);
        return Ok(());
    }
    let config = Arc::new(config);

    tracing::info!("Catalog source: {}", config.registry_url);

    // 1. Catalog:
    let registry = Arc::new(CkanRegistry::new(
        &config.registry_url,
        config.request_timeout,
        config.accept_invalid_certs,
    )?);
    let store = CatalogStore::new();
    let refresher = RefreshPipeline::new(registry, store.clone(), config.refresh_settings());

    // 2. Initial fill; on failure the first question retries.
    match refresher.refresh().await {
        Ok(snapshot) => tracing::info!("Catalog ready with {} datasets", snapshot.len()),
        Err(e) => tracing::warn!("Initial catalog refresh failed, starting empty: {}", e),
    }

    // 3. Query path:
    let guard = AbuseGuard::new(config.guard_settings());
    let service = QueryService::new(refresher, guard, config.query_settings());
    let app = router(service, config.clone());

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
