//! Server mode
//!
//! This module contains the HTTP server startup logic.

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, from_fn},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::api::middleware::log_requests;
use crate::config::get_config;
use crate::runtime::lifetime;
use crate::storage::Store;

/// Run the HTTP server
///
/// This function:
/// 1. Opens the configured store
/// 2. Binds and starts the HTTP server
/// 3. Stops gracefully on SIGINT / SIGTERM
/// 4. Closes the store after the server has drained
///
/// **Note**: Logging and configuration must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;
    let store: Arc<dyn Store> = startup.store;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let app_store = store.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(from_fn(log_requests))
            .app_data(web::Data::new(app_store.clone()))
            .configure(configure_routes)
    })
    .workers(cpu_count)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    info!(workers = cpu_count, "Server started at http://{}", bind_address);

    let handle = server.handle();
    tokio::spawn(async move {
        lifetime::shutdown::listen_for_shutdown().await;
        handle.stop(true).await;
    });

    let served = server.await.context("HTTP server error");
    warn!("Server stopped, closing store...");
    lifetime::shutdown::close_store(store).await;

    served?;
    info!("Server exited");
    Ok(())
}
