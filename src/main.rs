//! Binary entry point: load configuration, open the connection pool, run
//! migrations, and serve the router until shutdown.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use inkpost::config::AppConfig;
use inkpost::server;
use inkpost::storage::{Storage, postgres};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let config = AppConfig::load(config_path.as_deref())?;

    let pool = postgres::connect(config.database_url()?, config.max_connections)
        .await
        .context("failed to connect to database")?;
    postgres::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    tracing::info!("database connected");

    let app = server::app(Storage::postgres(pool.clone()));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.context("server error")?;

    // Explicit pool lifecycle: close on the way out.
    pool.close().await;
    Ok(())
}
