use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

use mentor_match::{app::create_router, app_state::AppState, config, db, telemetry::init_telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let telemetry = init_telemetry(None).await?;
    let config = config::init().context("Failed to load configuration")?;

    let pool = db::init_pool(&config.database)
        .await
        .context("Failed to initialize database pool")?;

    let app = create_router(AppState::new(pool, config.clone()));
    let addr = config.server_addr();
    info!("{} listening on {} ({:?})", config.app.name, addr, config.app.environment);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to serve application")?;

    telemetry.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
