//! Tracing setup for applications and tests using the adapters.
//!
//! Registration and dispatch emit `tracing` events (`info` for domains and
//! bindings, `debug` per read/write, `error` for missing bindings). Nothing
//! is printed until a subscriber is installed.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// ```bash
/// RUST_LOG=io_adapters=debug cargo test
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
