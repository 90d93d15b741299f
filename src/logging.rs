//! Tracing subscriber setup for the command-line entry point

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.level.as_str() };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global subscriber. Returns an error if one is already set.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let filter = env_filter(config, verbose);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match (config.format.as_str(), config.target.as_str()) {
        ("json", "stdout") => builder.json().with_writer(std::io::stdout).try_init(),
        ("json", _) => builder.json().with_writer(std::io::stderr).try_init(),
        ("compact", "stdout") => builder.compact().with_writer(std::io::stdout).try_init(),
        ("compact", _) => builder.compact().with_writer(std::io::stderr).try_init(),
        (_, "stdout") => builder.pretty().with_writer(std::io::stdout).try_init(),
        _ => builder.pretty().with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
