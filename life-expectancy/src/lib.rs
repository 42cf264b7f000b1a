//! Cleaning of Eurostat life expectancy data.

use tracing_subscriber::EnvFilter;

pub mod clean;
pub mod config;
pub mod output;
pub mod region;
pub mod source;
pub mod table;

#[cfg(test)]
mod test_runner;

/// Install a global logger.
///
/// The log level is taken from `RUST_LOG` and defaults to `info`. It is safe to call this more than
/// once; only the first call has any effect.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_file(true)
        .try_init();
}
