pub mod metrics;
pub mod redirect;
pub mod url;

pub use metrics::{MetricsService, metrics_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use url::{UrlService, api_routes};

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::json;
use tracing::{debug, error};

use crate::errors::SnaplinkError;

/// `snaplink_errors_total` 的 kind 标签
#[cfg_attr(not(feature = "metrics"), allow(dead_code))]
pub(crate) fn error_kind(err: &SnaplinkError) -> &'static str {
    match err {
        SnaplinkError::InvalidUrl(_) => "invalid_url",
        SnaplinkError::NotFound(_) => "not_found",
        SnaplinkError::Generation(_) => "generation",
        SnaplinkError::StorageUnavailable(_) => "storage",
        SnaplinkError::Config(_) | SnaplinkError::FileOperation(_) => "internal",
    }
}

/// `{"error": "..."}` 形式的 JSON 错误响应
pub(crate) fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "error": message }))
}

/// 记录存储层错误：调用方输入错误记 debug，其余记 error
pub(crate) fn log_store_error(context: &str, err: &SnaplinkError) {
    if err.is_user_error() {
        debug!("{}: {}", context, err);
    } else {
        error!("{}: {}", context, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(error_kind(&SnaplinkError::invalid_url("x")), "invalid_url");
        assert_eq!(error_kind(&SnaplinkError::not_found("x")), "not_found");
        assert_eq!(
            error_kind(&SnaplinkError::storage_unavailable("x")),
            "storage"
        );
    }

    #[test]
    fn test_error_response_status() {
        let resp = error_response(StatusCode::NOT_FOUND, "URL not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
