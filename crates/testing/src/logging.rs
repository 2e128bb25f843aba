//! Tracing setup for tests.

use tracing_subscriber::EnvFilter;

/// Initialize a test-friendly tracing subscriber
///
/// Reads `RUST_LOG` for the filter and writes through the test capture
/// writer. Safe to call from every test; only the first call installs a
/// subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
