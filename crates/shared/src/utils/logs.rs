use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use std::path::Path;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    /// Directory for the daily JSON log file; console only when `None`.
    pub log_dir: Option<String>,
}

/// Daily rolling `<component>.log.<date>` file behind a background writer thread.
fn file_writer(component: &str, log_dir: impl AsRef<Path>) -> (NonBlocking, WorkerGuard) {
    let file_name = format!("{component}.log");
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
    non_blocking(file_appender)
}

/// Installs the global subscriber. Keep the returned guard alive for the lifetime of the
/// process, dropping it flushes the file writer.
pub fn init_logger(
    component: &str,
    options: LoggerOptions,
    sdk_logger_provider: Option<&SdkLoggerProvider>,
) -> Option<WorkerGuard> {
    let (file_layer, guard) = match options.log_dir {
        Some(log_dir) => {
            let (writer, guard) = file_writer(component, &log_dir);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info"));

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(true)
        .with_filter(console_filter);

    let otel_layer = sdk_logger_provider.map(|provider| {
        OpenTelemetryTracingBridge::new(provider).with_filter(EnvFilter::new(
            "info,hyper=off,opentelemetry=off,tonic=off,h2=off,reqwest=off",
        ))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();

    guard
}
