use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use garage_booking::config::AppConfig;
use garage_booking::db;
use garage_booking::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url, config.busy_timeout_ms)?;
    tracing::info!("database ready at {}", config.database_url);

    let state = Arc::new(AppState::new(conn, config));
    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = garage_booking::app(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
