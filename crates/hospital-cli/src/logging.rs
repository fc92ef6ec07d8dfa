//! Stderr logging for the `hospital` binary.
//!
//! Stdout carries command output (tables, JSON), so log lines go to stderr.
//! The filter starts at a fixed level and is swapped for `logging.level` once
//! the config file is read. A set `RUST_LOG` pins the filter for the whole run.

use std::env;
use std::io;
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER: OnceLock<FilterHandle> = OnceLock::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(level: &str) {
    let rust_log = env::var("RUST_LOG").ok();
    let (filter, handle) = reload::Layer::new(startup_filter(rust_log.as_deref(), level));
    let output = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    if tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .is_ok()
    {
        let _ = FILTER.set(handle);
    }
}

/// Switches to the configured level. Returns false when `RUST_LOG` is set or
/// [`init`] never ran.
pub fn set_level(level: &str) -> bool {
    if env::var_os("RUST_LOG").is_some() {
        return false;
    }
    match FILTER.get() {
        Some(handle) => handle.reload(level_filter(level)).is_ok(),
        None => false,
    }
}

fn startup_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| level_filter(level))
}

/// Unparsable levels fall back to `warn`.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_directives_win() {
        let filter = startup_filter(Some("hospital_store=trace"), "warn");
        assert_eq!(filter.to_string(), "hospital_store=trace");
    }

    #[test]
    fn test_configured_level_without_rust_log() {
        assert_eq!(startup_filter(None, "info").to_string(), "info");
    }

    #[test]
    fn test_bad_level_falls_back_to_warn() {
        assert_eq!(level_filter("hospital=loud").to_string(), "warn");
        assert_eq!(startup_filter(Some("hospital=loud"), "debug").to_string(), "debug");
    }
}
