//! Request logging middleware
//!
//! Logs method, path, status and latency of every request through `tracing`.

use std::time::Instant;

use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use tracing::{info, warn};

/// 用法：`App::new().wrap(from_fn(log_requests))`
pub async fn log_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.path().to_string();

    let result = next.call(req).await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(res) => {
            let status = res.status().as_u16();
            if res.status().is_server_error() {
                warn!(%method, %path, status, latency_ms, "request failed");
            } else {
                info!(%method, %path, status, latency_ms, "request handled");
            }
        }
        Err(e) => {
            warn!(%method, %path, error = %e, latency_ms, "request errored");
        }
    }

    result
}
