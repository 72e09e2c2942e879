//! Process-wide tracing subscriber.
//!
//! The subscriber starts at a fixed level so configuration loading is logged,
//! then switches to the configured level through a reload handle.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER_HANDLE: OnceLock<FilterHandle> = OnceLock::new();

const DEFAULT_LEVEL: &str = "info";

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

fn rust_log_is_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

pub fn init_tracing() {
    init_tracing_with_level(DEFAULT_LEVEL);
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_tracing_with_level(level: &str) {
    let filter = if rust_log_is_set() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level))
    } else {
        level_filter(level)
    };

    let (filter_layer, handle) = reload::Layer::new(filter);
    if FILTER_HANDLE.set(handle).is_err() {
        return;
    }

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .try_init();
}

/// Switches to the configured level. `RUST_LOG` wins when set.
pub fn apply_logging_level(level: &str) {
    if rust_log_is_set() {
        return;
    }
    let Some(handle) = FILTER_HANDLE.get() else {
        return;
    };
    if let Err(e) = handle.modify(|f| *f = level_filter(level)) {
        tracing::warn!(error = %e, level, "failed to apply logging level");
    } else {
        tracing::debug!(level, "logging level applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_and_apply_are_idempotent() {
        init_tracing_with_level("warn");
        init_tracing();
        apply_logging_level("debug");
        apply_logging_level("error");
    }
}
