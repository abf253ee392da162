use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::Store;

/// 关闭存储的超时时间（秒）
const CLOSE_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C 或 SIGTERM
pub async fn listen_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

/// 关闭存储，失败只记录日志
pub async fn close_store(store: Arc<dyn Store>) {
    match timeout(Duration::from_secs(CLOSE_TIMEOUT_SECS), store.close()).await {
        Ok(Ok(())) => info!("{} store closed", store.backend_name()),
        Ok(Err(e)) => error!("Failed to close store: {}", e),
        Err(_) => error!(
            "Closing store timed out after {} seconds",
            CLOSE_TIMEOUT_SECS
        ),
    }
}
