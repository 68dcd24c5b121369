//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install a fmt subscriber with the default filter.
///
/// Panics if a global subscriber is already set; use [`try_init_with`] from
/// code that may run more than once (tests, embedded hosts).
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(&LogConfig::default()))
        .init();
}

/// Install a fmt subscriber unless one is already installed.
///
/// Returns `true` if this call installed it.
pub fn try_init_with(config: &LogConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_target(config.with_target)
        .try_init()
        .is_ok()
}

fn filter_for(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_is_idempotent() {
        let config = LogConfig::default();
        try_init_with(&config);
        assert!(!try_init_with(&config));
    }
}
