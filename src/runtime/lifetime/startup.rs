use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::storage::{Store, StoreFactory};

pub struct StartupContext {
    pub store: Arc<dyn Store>,
}

/// 准备服务器启动的上下文（目前只有存储）
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StoreFactory::create(&config.storage)
        .await
        .with_context(|| format!("Failed to create {} store", config.storage.backend))?;

    match store.backend_name() {
        "sqlite" => info!(
            path = %config.storage.database_path,
            "Using SQLite storage"
        ),
        name => info!("Using {} storage", name),
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { store })
}
