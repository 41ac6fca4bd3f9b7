//! Observability for topup-report
//!
//! - `tracing` events for every pipeline stage
//! - Subscriber writes to stderr; stdout carries command output only
//! - Level from `RUST_LOG`, `warn` when unset

mod events;

pub use events::Event;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a pipeline event at the level its kind implies
pub fn log_event(event: Event) {
    if event.is_failure() {
        tracing::event!(Level::ERROR, event = event.as_str());
    } else {
        tracing::event!(Level::INFO, event = event.as_str());
    }
}
