// Logging module - Diagnostic logging infrastructure
use crate::domain::error::{SerialCalcError, SerialCalcResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
pub fn build_filter(log_level: &str, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = if verbose {
        "debug"
    } else {
        match log_level {
            "error" | "warn" | "info" | "debug" | "trace" => log_level,
            _ => "warn",
        }
    };

    EnvFilter::new(format!("serialcalc={}", level))
}

/// Initialize diagnostics on stderr, leaving stdout to the interactive console.
pub fn init_logging(log_level: &str, verbose: bool) -> SerialCalcResult<()> {
    tracing_subscriber::registry()
        .with(build_filter(log_level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true)
                .with_file(verbose)
                .with_line_number(verbose),
        )
        .try_init()
        .map_err(|e| SerialCalcError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("SerialCalc logging system initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_init() {
        assert!(init_logging("info", false).is_ok());
        // A second subscriber cannot be installed.
        assert!(init_logging("info", false).is_err());
    }

    #[test]
    fn test_unknown_level_falls_back() {
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(build_filter("loud", false).to_string(), "serialcalc=warn");
            assert_eq!(build_filter("warn", true).to_string(), "serialcalc=debug");
        }
    }
}
