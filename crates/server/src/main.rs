use std::sync::Arc;

use advisor::HttpAdvisoryClient;
use db::{create_pool, run_registry_migrations, TenantRegistry, TenantResolver};
use server::config::ServerConfig;
use server::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    tokio::fs::create_dir_all(&config.data_dir).await?;

    let registry_pool = create_pool(&config.registry_url()).await?;
    run_registry_migrations(&registry_pool).await?;

    let resolver = TenantResolver::new(TenantRegistry::new(registry_pool), &config.data_dir);
    let advisor = HttpAdvisoryClient::with_timeout(
        config.advisor_url.clone(),
        config.advisor_api_key.clone(),
        config.advisor_timeout,
    )?;

    let state = AppState::new(resolver, Arc::new(advisor));
    let app = server::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
