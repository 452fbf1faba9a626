//! Structured logging setup.
//!
//! Thin wrapper over `tracing-subscriber` with env-filter support. Hosting
//! applications call [`init_tracing`] once at startup; library code only
//! emits events and never installs a subscriber itself.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize the tracing subscriber for structured logging.
///
/// The filter comes from `RUST_LOG` when set; otherwise `classcheck=debug`
/// in verbose mode and `classcheck=info` by default. Events go to stderr so
/// generated content on stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("classcheck=debug,info")
            } else {
                EnvFilter::try_new("classcheck=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_ansi(use_color()),
        )
        .try_init()?;

    Ok(())
}
