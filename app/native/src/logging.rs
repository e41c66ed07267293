//! Logging setup for the `jester` binary.
//!
//! Filtering follows `RUST_LOG`:
//! - `RUST_LOG=debug` - everything at debug
//! - `RUST_LOG=jester_lib::modules::session=trace` - every signal the coordinator sees
//!
//! Without `RUST_LOG` only warnings and errors are printed. Output goes to
//! stderr so command output on stdout stays machine-readable.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Default filter when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Builds the console filter from `RUST_LOG`, falling back to warnings only.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init() {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter());

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
