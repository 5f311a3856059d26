use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG`, when set and valid, takes precedence over `verbosity`.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level_for(verbosity))
            .map_err(|e| anyhow!("invalid log level: {e}"))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| anyhow!("logging already initialized"))
}
