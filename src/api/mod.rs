//! HTTP layer
//!
//! - `services`: route handlers (shorten, stats, summary, metrics, redirect)
//! - `middleware`: request logging

pub mod middleware;
pub mod services;

use actix_web::web;

use services::{api_routes, metrics_routes, redirect_routes};

/// 注册全部路由；`/{id}` 放在最后，避免吞掉 `/metrics`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_routes())
        .service(metrics_routes())
        .service(redirect_routes());
}
