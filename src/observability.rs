//! Logging setup.
//!
//! Structured logs via `tracing`, filtered by `RUST_LOG` when set. Every
//! process (supervisor and workers alike) installs its own subscriber; log
//! lines carry the emitting process's pid where it matters.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Call once, early in `main`.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prefork_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
