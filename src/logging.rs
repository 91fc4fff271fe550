//! Tracing setup for embedding shells.
//!
//! The crate itself only emits `tracing` events; installing a subscriber is
//! left to the application. Shells that do not need anything fancier can call
//! `logging::init()` once at startup.

use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Use the RUST_LOG env var to control the log level (e.g. RUST_LOG=debug).
/// Output goes to stderr so it never mixes with UI output on stdout.
/// Panics if a global subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
