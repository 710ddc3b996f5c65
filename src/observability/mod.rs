//! Logging setup and phase tracking.
//!
//! Logs are emitted with `tracing` and written to stderr so that JSON or
//! markdown reports on stdout stay machine-readable.
//!
//! ## Usage
//!
//! ```ignore
//! use greenrisk::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(cli_verbosity);
//!     // ... rest of application
//! }
//! ```

pub mod phase;

pub use phase::{phase_span, PipelinePhase};

use tracing_subscriber::EnvFilter;

/// Default log level for a `-v` count when `RUST_LOG` is unset.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `-v`.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
