// src/logging.rs

//! Diagnostics for the `planline` binary.
//!
//! The filter comes from `--log-level` when given, otherwise from the
//! `PLANLINE_LOG` env var (any `EnvFilter` directive, e.g. `debug` or
//! `planline::cpm=trace`), otherwise `info`. Output goes to stderr; stdout
//! carries only the rendered plan.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

const LOG_ENV: &str = "PLANLINE_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Call once, before loading the plan.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(filter_for(cli_level, std::env::var(LOG_ENV).ok()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// An unparsable `PLANLINE_LOG` falls back to the default.
fn filter_for(cli_level: Option<LogLevel>, env: Option<String>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.directive());
    }
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
