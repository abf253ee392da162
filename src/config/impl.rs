use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to defaults when
/// `init_config()` has not been called yet.
pub fn get_config() -> Arc<StaticConfig> {
    match CONFIG.get() {
        Some(config) => config.load_full(),
        None => Arc::new(StaticConfig::default()),
    }
}

/// Initialize the global configuration
///
/// Only the first call takes effect; later calls keep the existing value.
///
/// # Examples
/// ```no_run
/// use snaplink::config::{StaticConfig, init_config};
/// init_config(StaticConfig::default());
/// ```
pub fn init_config(config: StaticConfig) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(config));
}
