use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Verbosity;

/// Environment variable holding an `EnvFilter` directive that overrides -v/-q
pub const LOG_ENV_VAR: &str = "FRAGLOG_LOG";

/// Install the global diagnostics subscriber.
///
/// Diagnostics always go to stderr because stdout may carry the JSON report.
/// Calling this twice is harmless; the second subscriber is dropped.
pub fn init_logging(verbosity: Verbosity) {
    let filter = build_filter(verbosity);

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter_when_env_unset() {
        if std::env::var_os(LOG_ENV_VAR).is_some() {
            return;
        }
        assert_eq!(build_filter(Verbosity::Quiet).to_string(), "error");
        assert_eq!(build_filter(Verbosity::Debug).to_string(), "debug");
    }
}
