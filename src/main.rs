//! Server: reads config from the environment, opens the PostgreSQL pool, applies migrations, serves the API.

use cinema_api::{app, apply_migrations, AppState, Config, PgMovieStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let pool = config.db.pool_options().connect(&config.db.url).await?;
    tracing::info!("database connection pool established");

    apply_migrations(&pool).await?;

    let state = AppState::new(Arc::new(PgMovieStore::new(pool.clone())), config.env.clone());
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, env = %config.env, "starting server");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("stopped server");
    Ok(())
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("cinema_api=info,tower_http=info"))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_development() {
        builder.init();
    } else {
        builder.json().init();
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down server");
}
