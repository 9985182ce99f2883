// tests/common.rs
//! Shared test utilities: logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
#[allow(dead_code)]
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent
}

/// Force debug-level logging even if RUST_LOG is not set
#[allow(dead_code)]
pub fn setup_debug() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::new("plainconf=debug"))
        .try_init()
        .ok();
}
