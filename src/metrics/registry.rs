//! Global metrics registry
//!
//! Defines all Prometheus metrics used in the application.

use once_cell::sync::Lazy;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

/// Global metrics instance
pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Application metrics container
pub struct Metrics {
    /// Internal Prometheus registry
    registry: Registry,

    /// Successful redirects by short URL id
    pub redirects_total: CounterVec,

    /// Shorten requests received
    pub shorten_requests_total: Counter,

    /// Errors by kind (invalid_request, invalid_url, not_found, storage)
    pub errors_total: CounterVec,
}

impl Metrics {
    fn new() -> Self {
        let registry = Registry::new();

        let redirects_total = CounterVec::new(
            Opts::new(
                "snaplink_redirects_total",
                "Total number of redirects by short URL id",
            ),
            &["url_id"],
        )
        .expect("Failed to create redirects_total metric");

        let shorten_requests_total = Counter::new(
            "snaplink_shorten_requests_total",
            "Total number of shorten requests",
        )
        .expect("Failed to create shorten_requests_total metric");

        let errors_total = CounterVec::new(
            Opts::new("snaplink_errors_total", "Total number of errors by kind"),
            &["kind"],
        )
        .expect("Failed to create errors_total metric");

        registry
            .register(Box::new(redirects_total.clone()))
            .expect("Failed to register redirects_total");
        registry
            .register(Box::new(shorten_requests_total.clone()))
            .expect("Failed to register shorten_requests_total");
        registry
            .register(Box::new(errors_total.clone()))
            .expect("Failed to register errors_total");

        Self {
            registry,
            redirects_total,
            shorten_requests_total,
            errors_total,
        }
    }

    /// Export all metrics in Prometheus text format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_registered_metrics() {
        METRICS.shorten_requests_total.inc();
        METRICS.redirects_total.with_label_values(&["abc123"]).inc();
        METRICS.errors_total.with_label_values(&["not_found"]).inc();

        let output = METRICS.export();
        assert!(output.contains("snaplink_shorten_requests_total"));
        assert!(output.contains("snaplink_redirects_total{url_id=\"abc123\"}"));
        assert!(output.contains("snaplink_errors_total{kind=\"not_found\"}"));
    }
}
