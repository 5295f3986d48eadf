use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use cw_api::app::create_app;
use cw_api::config;
use cw_api::routes::auth::AppState;
use cw_shared::config::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables, environment-specific file first
    dotenv::from_filename(Environment::from_env().env_file()).ok();
    dotenv::dotenv().ok();

    let config = config::load().context("failed to load configuration")?;

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!(
        "Starting community web gateway ({}) against {}",
        config.environment, config.backend.graphql_url
    );

    let services =
        cw_infra::initialize(&config).context("failed to initialize infrastructure")?;
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let state = web::Data::new(AppState::new(
        services.backend,
        services.flows,
        Arc::new(config),
    ));

    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}
