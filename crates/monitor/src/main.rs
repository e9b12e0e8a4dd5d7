//! Boiler Monitor - streaming telemetry analytics host
//!
//! Reads JSON-lines telemetry from a file or stdin, keeps a rolling window
//! per boiler, and logs analytics outcomes as structured JSON events.

use analytics_lib::{AnalyticsConfig, StructuredLogger};
use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod ingest;

const MONITOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs, filter from RUST_LOG
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    let config = config::MonitorConfig::load().context("Failed to load monitor configuration")?;
    let analytics = AnalyticsConfig::load(config.analytics_config.as_deref())
        .context("Failed to load analytics configuration")?;
    info!(
        boiler_id = %config.boiler_id,
        window = analytics.window.buffer_capacity,
        report_every = config.report_every,
        stdin = config.reads_stdin(),
        "Monitor configured"
    );

    let logger = StructuredLogger::new(&config.boiler_id);
    logger.log_startup(MONITOR_VERSION, &config.input);

    let reader = ingest::open_input(&config.input).await?;
    let mut monitor = ingest::Monitor::new(analytics, logger.clone(), config.report_every);
    if let Some(seed) = config.seed {
        monitor = monitor.with_seed(seed);
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    let reason = monitor.run(reader, shutdown_rx).await?;
    let stats = monitor.stats();
    info!(
        lines = stats.lines,
        accepted = stats.accepted,
        rejected = stats.rejected,
        reports = stats.reports,
        "Ingest finished"
    );
    logger.log_shutdown(&reason.to_string(), stats.accepted);

    Ok(())
}
