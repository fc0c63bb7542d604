//! Tracing subscriber setup for the command line front-end.

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Level for this crate's own events: `debug` when verbose, otherwise silent.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

/// Installs the global subscriber. `RUST_LOG` still applies on top of the
/// flag, so dependencies can be traced without touching the CLI.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level_filter = level_for(verbose);
    let app_filter = Targets::new().with_target("fxroute", level_filter);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter.to_string()));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
        .try_init()
        .context("Failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_enables_debug() {
        assert_eq!(level_for(false), LevelFilter::OFF);
        assert_eq!(level_for(true), LevelFilter::DEBUG);
        assert_eq!(level_for(true).to_string(), "debug");
    }
}
