pub mod config;
pub mod cost;
pub mod generation;
pub mod jobs;
pub mod pricing;
pub mod scoring;
pub mod session;
pub mod variations;
pub mod volume;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once per process. Commands call it
/// before doing any work so library-level spans are not lost.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
