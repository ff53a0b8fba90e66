//! Logging setup
//!
//! stdout carries command output (reports, CSV, tables); all diagnostics
//! go to stderr through `tracing`.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "CHECKSHEET_LOG";

/// Default filter level for the given verbosity flags
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initialize the global subscriber
///
/// `CHECKSHEET_LOG` wins over `RUST_LOG`, which wins over the flags.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("checksheet={}", default_level(verbose, quiet)))
        });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
