//! Superheroes API server: reads config from the environment, prepares the SQLite schema
//! and serves the REST routes.

use superheroes::{app, apply_migrations, connect, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(superheroes::config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    let pool = connect(&config.database).await?;
    apply_migrations(&pool).await?;

    let app = app(AppState::new(pool.clone()), &config.http);

    let listener = TcpListener::bind(config.http.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
