//! Tracing setup. Logs go to stderr so stdout stays clean for JSON.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `--verbose` forces `debug`. Otherwise `RUST_LOG` wins over the configured
/// default level.
pub fn init_tracing(verbose: bool, ansi: bool, default_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}
