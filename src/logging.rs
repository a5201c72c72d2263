//! Tracing subscriber setup for the binary
//!
//! Library code only emits events through `tracing` macros; installing a
//! subscriber is left to the binary and happens once per process.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "cashflow=info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
///
/// `verbose` raises this crate to debug level on top of whatever the
/// environment asks for.
pub fn build_filter(verbose: bool) -> EnvFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if !verbose {
        return filter;
    }
    match "cashflow=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initializes the global tracing subscriber, writing to stderr
pub fn init(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(build_filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
