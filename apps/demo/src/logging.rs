use crate::settings::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

/// Installs the global subscriber described by `settings`.
///
/// `log_level` is either a level (`debug`) or a filter directive
/// (`sconfig=trace,info`); `RUST_LOG` still takes precedence.
/// The returned guard flushes the file writer on drop and must outlive logging.
pub(crate) fn init(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(&settings.log_level)?;

    let mut layers = Vec::new();
    if !settings.quiet {
        let console = layer().with_writer(io::stderr).with_ansi(io::stderr().is_terminal());
        layers.push(if settings.log_json { console.json().boxed() } else { console.compact().boxed() });
    }

    let guard = if settings.log_dir.is_empty() {
        None
    } else {
        let dir = Path::new(&settings.log_dir);
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(env!("CARGO_PKG_NAME"))
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(settings.log_files.max(1))
            .build(dir)
            .context("failed to create rolling log appender")?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file = layer().with_writer(writer).with_ansi(false);
        layers.push(if settings.log_json { file.json().boxed() } else { file.boxed() });
        Some(guard)
    };

    if layers.is_empty() {
        return Ok(guard);
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}

fn env_filter(directive: &str) -> Result<EnvFilter> {
    let builder = EnvFilter::builder();
    if let Ok(level) = LevelFilter::from_str(directive) {
        return Ok(builder.with_default_directive(level.into()).from_env_lossy());
    }
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(builder.from_env_lossy());
    }
    builder.parse(directive).with_context(|| format!("invalid log filter \"{directive}\""))
}
