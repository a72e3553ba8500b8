mod logs;
mod metrics;
mod otel;
mod shutdown;

pub use self::logs::{LoggerOptions, init_logger};
pub use self::metrics::{
    Method, Metrics, Status, SystemMetrics, encode_registry, run_metrics_collector,
};
pub use self::otel::{ServiceTelemetry, Telemetry, TelemetryProviders, TracingContext};
pub use self::shutdown::shutdown_signal;
