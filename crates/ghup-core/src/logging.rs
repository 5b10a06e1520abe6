//! Logging init: structured logs to stderr, quiet unless asked.
//!
//! A successful run must not print anything, so the default filter only lets
//! warnings through. `RUST_LOG` always wins over the built-in defaults.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and `--verbose` was not given.
const QUIET_FILTER: &str = "warn";

/// Filter used when `RUST_LOG` is unset and `--verbose` was given.
const VERBOSE_FILTER: &str = "info,ghup_core=debug,ghup=debug";

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        QUIET_FILTER
    }
}

/// Initialize logging to stderr.
/// Returns Err if a global subscriber is already installed so the caller can carry on without one.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!(verbose, "ghup logging initialized");
    Ok(())
}
