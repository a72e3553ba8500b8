use anyhow::{Context, Result};
use dotenv::dotenv;
use marketplace::{config::Config, handler::AppRouter, state::AppState};
use shared::utils::{LoggerOptions, Telemetry, init_logger, run_metrics_collector};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let providers = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::new("marketplace", endpoint.clone())
                .init()
                .context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        "marketplace",
        LoggerOptions {
            log_dir: config.log_dir.clone(),
        },
        providers.as_ref().map(|providers| &providers.logger),
    );

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

    let app = AppRouter::build(state, &config.cors_allowed_origins);

    AppRouter::serve(config.port, app)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    if let Some(providers) = providers {
        if let Err(e) = providers.shutdown() {
            error!("❌ {e}");
        }
    }

    Ok(())
}
