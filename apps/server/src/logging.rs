//! Logging initialization for the server binary
//!
//! Supports configuration-based logging with file rotation, JSON formatting,
//! and `RUST_LOG` overrides.

use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Keeps the non-blocking file writer alive. Hold it for the program duration
/// so buffered log lines are flushed on exit.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialize logging from `LoggingConfig`:
/// - JSON or human-readable console output
/// - Optional file output with rotation (daily, hourly, minutely, never)
/// - `RUST_LOG` takes precedence over `logging.level`
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let subscriber = tracing_subscriber::registry().with(build_env_filter(config));

    let file_guard = if config.json {
        init_json_logging_with_subscriber(subscriber, config)?
    } else {
        init_human_logging_with_subscriber(subscriber, config)?
    };

    tracing::info!(
        service_name = %config.service_name,
        environment = %config.deployment_environment,
        file_enabled = config.file_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Include both the binary and the library crate module paths
        EnvFilter::new(format!(
            "staybook_server={},staybook={},staybook_search={},tower_http=info,sqlx=warn",
            config.level, config.level, config.level
        ))
    })
}

fn init_json_logging_with_subscriber<S>(
    subscriber: S,
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>>
where
    S: SubscriberExt + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    let console_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(std::io::stdout);

    if config.file_enabled {
        let (file_appender, file_guard) = create_file_appender(config)?;
        let file_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(file_appender);

        subscriber.with(console_layer).with(file_layer).init();
        Ok(Some(file_guard))
    } else {
        subscriber.with(console_layer).init();
        Ok(None)
    }
}

fn init_human_logging_with_subscriber<S>(
    subscriber: S,
    config: &LoggingConfig,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>>
where
    S: SubscriberExt + for<'a> tracing_subscriber::registry::LookupSpan<'a> + Send + Sync,
{
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stdout);

    if config.file_enabled {
        let (file_appender, file_guard) = create_file_appender(config)?;
        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        subscriber.with(console_layer).with(file_layer).init();
        Ok(Some(file_guard))
    } else {
        subscriber.with(console_layer).init();
        Ok(None)
    }
}

fn create_file_appender(
    config: &LoggingConfig,
) -> anyhow::Result<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    fs::create_dir_all(&config.file_directory)?;

    let directory = &config.file_directory;
    let prefix = &config.file_prefix;
    let file_appender = match config.file_rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(directory, prefix),
        "minutely" => tracing_appender::rolling::minutely(directory, prefix),
        "never" => tracing_appender::rolling::never(directory, format!("{prefix}.log")),
        _ => tracing_appender::rolling::daily(directory, prefix),
    };

    Ok(tracing_appender::non_blocking(file_appender))
}
