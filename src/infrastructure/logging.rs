use std::{env, io, path::Path};

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::env::LoggingConfig;

const LOG_FILE_PREFIX: &str = "prestige-leads.log";

static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// `RUST_LOG` wins over the configured level; anything unparsable falls back to `info`.
fn build_filter(env_directives: Option<&str>, level: &str) -> EnvFilter {
    env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub fn init_tracing(logging: &LoggingConfig, logs_dir: &Path) -> Result<()> {
    if GUARD.get().is_some() {
        return Ok(());
    }

    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &logging.level);

    let file_appender = rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout).with_target(true))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()?;
    let _ = GUARD.set(guard);

    tracing::info!(
        logs = %logs_dir.display(),
        file = LOG_FILE_PREFIX,
        level = %logging.level,
        "tracing initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_without_rust_log() {
        assert_eq!(build_filter(None, "warn").to_string(), "warn");
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let filter = build_filter(Some("prestige_leads=debug"), "warn");
        assert_eq!(filter.to_string(), "prestige_leads=debug");
    }
}
