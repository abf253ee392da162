use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, trace};

use super::{error_response, log_store_error};
use crate::errors::SnaplinkError;
use crate::storage::Store;
use crate::utils::is_valid_id;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<Arc<dyn Store>>,
    ) -> impl Responder {
        let id = path.into_inner();

        // 非法 ID 直接 404，不访问存储
        if !is_valid_id(&id) {
            trace!("Invalid id rejected: {}", id);
            inc_counter!(METRICS.errors_total, &["not_found"]);
            return Self::not_found_response();
        }

        match store.get(&id).await {
            Ok(record) => {
                inc_counter!(METRICS.redirects_total, &[id.as_str()]);
                debug!(id = %id, hits = record.hits, "Redirecting");
                HttpResponse::Found()
                    .insert_header((header::LOCATION, record.original))
                    .finish()
            }
            Err(e) => {
                inc_counter!(METRICS.errors_total, &[super::error_kind(&e)]);
                log_store_error(&format!("Redirect lookup for '{}' failed", id), &e);
                match e {
                    SnaplinkError::NotFound(_) => Self::not_found_response(),
                    _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get URL"),
                }
            }
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        error_response(StatusCode::NOT_FOUND, "URL not found")
    }
}

/// 短链接跳转路由，需在其它路由之后注册
///
/// 只响应 GET；HEAD 不计入点击数，由 actix 返回 405。
pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{id}").route(web::get().to(RedirectService::handle_redirect))
}
