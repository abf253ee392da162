//! Shorten / stats / summary handlers under `/api`

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{error_response, log_store_error};
use crate::errors::SnaplinkError;
use crate::storage::{Store, UrlRecord};

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub urls: Vec<UrlRecord>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub total_urls: u64,
    pub total_hits: u64,
}

pub struct UrlService;

impl UrlService {
    pub async fn shorten(
        body: web::Json<ShortenRequest>,
        store: web::Data<Arc<dyn Store>>,
    ) -> impl Responder {
        inc_plain_counter!(METRICS.shorten_requests_total);

        match store.create(&body.url).await {
            Ok(record) => {
                info!(id = %record.id, original = %record.original, "URL shortened");
                HttpResponse::Ok().json(record)
            }
            Err(e) => {
                inc_counter!(METRICS.errors_total, &[super::error_kind(&e)]);
                log_store_error(&format!("Shorten '{}' failed", body.url), &e);
                match e {
                    SnaplinkError::InvalidUrl(_) => {
                        error_response(StatusCode::BAD_REQUEST, "Invalid URL")
                    }
                    _ => error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to create shortened URL",
                    ),
                }
            }
        }
    }

    pub async fn stats(store: web::Data<Arc<dyn Store>>) -> impl Responder {
        match store.get_stats().await {
            Ok(urls) => HttpResponse::Ok().json(StatsResponse { urls }),
            Err(e) => {
                inc_counter!(METRICS.errors_total, &[super::error_kind(&e)]);
                error!("Failed to get stats: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get stats")
            }
        }
    }

    pub async fn summary(store: web::Data<Arc<dyn Store>>) -> impl Responder {
        let total_urls = match store.get_total_count().await {
            Ok(n) => n,
            Err(e) => {
                inc_counter!(METRICS.errors_total, &[super::error_kind(&e)]);
                error!("Failed to get total count: {}", e);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to get total count",
                );
            }
        };

        let total_hits = match store.get_total_hits().await {
            Ok(n) => n,
            Err(e) => {
                inc_counter!(METRICS.errors_total, &[super::error_kind(&e)]);
                error!("Failed to get total hits: {}", e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get total hits");
            }
        };

        HttpResponse::Ok().json(SummaryResponse {
            total_urls,
            total_hits,
        })
    }
}

/// 请求体无法解析为 `{"url": "..."}` 时统一返回 400 Invalid request
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    inc_counter!(METRICS.errors_total, &["invalid_request"]);
    debug!("Invalid shorten request body: {}", err);
    InternalError::from_response(err, error_response(StatusCode::BAD_REQUEST, "Invalid request"))
        .into()
}

/// `/api` 路由
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/shorten", web::post().to(UrlService::shorten))
        .route("/stats", web::get().to(UrlService::stats))
        .route("/summary", web::get().to(UrlService::summary))
}
