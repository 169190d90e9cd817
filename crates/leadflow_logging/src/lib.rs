//! Logging setup for the leadflow binary.
//!
//! Three layers: stderr for the operator, a daily rolling file with every
//! event that passes the filter, and a daily rolling error-only file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str =
    "leadflow=info,leadflow_db=info,leadflow_sinks=info,leadflow_validation=info,sqlx=warn";
const VERBOSE_LOG_FILTER: &str =
    "leadflow=debug,leadflow_db=debug,leadflow_sinks=debug,leadflow_validation=debug,sqlx=warn";

/// Logging configuration.
pub struct LogConfig<'a> {
    /// Prefix of the log file names (`<app_name>.log`, `<app_name>_errors.log`).
    pub app_name: &'a str,
    pub log_dir: PathBuf,
    /// Raise the console and file filter to debug. `RUST_LOG` still wins.
    pub verbose: bool,
}

/// Flushes the non-blocking file writers when dropped.
///
/// Hold it for the lifetime of `main`; events logged after it is dropped
/// may be lost.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    fs::create_dir_all(&config.log_dir).with_context(|| {
        format!(
            "Failed to create logs directory: {}",
            config.log_dir.display()
        )
    })?;

    let main_file = rolling_appender(&config.log_dir, &format!("{}.log", config.app_name))?;
    let error_file = rolling_appender(
        &config.log_dir,
        &format!("{}_errors.log", config.app_name),
    )?;
    let (main_writer, main_guard) = tracing_appender::non_blocking(main_file);
    let (error_writer, error_guard) = tracing_appender::non_blocking(error_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(main_writer)
                .with_ansi(false)
                .with_filter(env_filter(config.verbose)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(error_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::ERROR),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(config.verbose)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard {
        _guards: vec![main_guard, error_guard],
    })
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn rolling_appender(dir: &Path, file_name: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file {} in {}", file_name, dir.display()))
}
