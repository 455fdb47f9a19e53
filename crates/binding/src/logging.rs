//! Tracing subscriber setup for applications embedding the engine

/// Install a global subscriber with an `EnvFilter` from `RUST_LOG`
///
/// Returns `false` when a subscriber is already installed.
pub fn init_logging(default_filter: &str) -> bool {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
