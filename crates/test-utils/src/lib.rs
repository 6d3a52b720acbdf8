//! Shared helpers for navmenu tests: tree fixtures and tracing setup.
pub mod fixtures;

pub use fixtures::*;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a subscriber writing through the test harness' captured output. `RUST_LOG` wins over `level` when set.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level}")));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .without_time()
        .with_test_writer();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
