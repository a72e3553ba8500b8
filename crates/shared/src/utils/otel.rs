use crate::utils::{Method, Metrics, Status};
use anyhow::{Context as _, Result};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use opentelemetry_otlp::{LogExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, logs::SdkLoggerProvider, trace::SdkTracerProvider};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

#[derive(Clone)]
pub struct Telemetry {
    service_name: String,
    otel_endpoint: String,
}

/// Providers installed by [`Telemetry::init`]; shut them down to flush pending exports.
pub struct TelemetryProviders {
    pub tracer: SdkTracerProvider,
    pub logger: SdkLoggerProvider,
}

impl TelemetryProviders {
    pub fn shutdown(self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracer.shutdown() {
            errors.push(format!("tracer provider: {e}"));
        }
        if let Err(e) = self.logger.shutdown() {
            errors.push(format!("logger provider: {e}"));
        }

        if !errors.is_empty() {
            anyhow::bail!("Failed to shutdown providers:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}

impl Telemetry {
    pub fn new(service_name: impl Into<String>, otel_endpoint: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            otel_endpoint: otel_endpoint.into(),
        }
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    /// Installs the OTLP span exporter as the global tracer provider and builds the log provider.
    pub fn init(&self) -> Result<TelemetryProviders> {
        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()
            .context("Failed to create span exporter")?;

        let tracer = SdkTracerProvider::builder()
            .with_resource(self.resource())
            .with_batch_exporter(span_exporter)
            .build();

        global::set_tracer_provider(tracer.clone());

        let log_exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()
            .context("Failed to create log exporter")?;

        let logger = SdkLoggerProvider::builder()
            .with_resource(self.resource())
            .with_batch_exporter(log_exporter)
            .build();

        Ok(TelemetryProviders { tracer, logger })
    }
}

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
    pub operation: &'static str,
}

/// Span and request metrics bookkeeping shared by the services.
#[derive(Clone)]
pub struct ServiceTelemetry {
    tracer_name: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl ServiceTelemetry {
    /// Registers the shared request families under `<tracer_name>_request_*`.
    pub async fn register(
        tracer_name: &'static str,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let prefix = tracer_name.replace('-', "_");
        {
            let metrics = metrics.lock().await;
            let mut registry = registry.lock().await;

            registry.register(
                format!("{prefix}_request_counter"),
                format!("Total number of requests to the {tracer_name}"),
                metrics.request_counter.clone(),
            );
            registry.register(
                format!("{prefix}_request_duration"),
                format!("Histogram of request durations for the {tracer_name}"),
                metrics.request_duration.clone(),
            );
        }

        Self {
            tracer_name,
            metrics,
        }
    }

    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start(&self, operation: &'static str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.tracer();
        let mut span = tracer
            .span_builder(operation)
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation)],
        );

        let cx = Context::current_with_span(span);
        TracingContext {
            cx,
            start_time,
            operation,
        }
    }

    pub async fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, true, message).await;
    }

    pub async fn failure(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, false, message).await;
    }

    async fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ {} completed: {message}", tracing_ctx.operation);
        } else {
            error!("❌ {} failed: {message}", tracing_ctx.operation);
        }

        self.metrics
            .lock()
            .await
            .record(tracing_ctx.operation, method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
