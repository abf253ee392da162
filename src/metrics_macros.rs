//! Metrics helper macros
//!
//! Expand to nothing when the `metrics` feature is disabled, so handlers
//! can record unconditionally.

/// Increment a CounterVec with given labels.
///
/// Usage:
/// ```ignore
/// inc_counter!(METRICS.redirects_total, &[id.as_str()]);
/// ```
macro_rules! inc_counter {
    ($counter:expr, $labels:expr) => {
        #[cfg(feature = "metrics")]
        $counter.with_label_values($labels).inc();
    };
}

/// Increment a plain Counter (no labels).
///
/// Usage:
/// ```ignore
/// inc_plain_counter!(METRICS.shorten_requests_total);
/// ```
macro_rules! inc_plain_counter {
    ($counter:expr) => {
        #[cfg(feature = "metrics")]
        $counter.inc();
    };
}
