//! Logging infrastructure for ragway
//!
//! Structured logging via `tracing` with an `EnvFilter`-driven subscriber.
//! `RUST_LOG` takes precedence; otherwise verbosity falls back to the
//! `--verbose` flag.

use std::io::IsTerminal;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Check if colored output should be used.
///
/// Returns true only if:
/// - stdout is a terminal (TTY)
/// - NO_COLOR environment variable is not set
fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize the tracing subscriber for structured logging.
///
/// Sets up tracing with either compact (default) or verbose format. Verbose
/// format includes targets and span close events for request timing.
///
/// # Arguments
/// * `verbose` - If true, use verbose format with debug-level gateway spans
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("ragway=debug,tower_http=debug,info")
            } else {
                EnvFilter::try_new("ragway=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(use_color())
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(use_color())
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}
