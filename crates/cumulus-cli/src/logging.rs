//! Tracing subscriber initialisation
//!
//! Verbosity mapping: no flag = warn, `-v` = info, `-vv` = debug,
//! `-vvv` = trace, `--quiet` = error. `RUST_LOG` overrides all of them.
//! Output always goes to stderr; stdout carries the inventory JSON.

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber. Call exactly once.
///
/// # Errors
/// Returns an error when a subscriber is already registered.
pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let level = derive_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cumulus_cli={level},cumulus_core={level},cumulus_client={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("failed to initialise tracing: {e}"))
}

fn derive_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
