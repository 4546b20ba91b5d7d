use actix_web::{web, HttpServer};
use anyhow::Context;

use tg_api::{create_app, telemetry, AppState};
use tg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config.validate().map_err(anyhow::Error::msg)?;
    telemetry::init(&config.logging)?;

    tracing::info!(
        environment = ?config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting TradeGuider API server"
    );

    let infra = tg_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;
    let state = web::Data::new(
        AppState::new(&config, infra).context("failed to build application state")?,
    );

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;
    tracing::info!("Server stopped");
    Ok(())
}
