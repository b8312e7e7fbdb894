//! Pegged Order Engine Binary
//!
//! Works one pegged order against the in-memory simulated venue, driven by a
//! seeded random walk of quotes, and logs how it ends.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pegged-order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `PEG_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `RUST_LOG`: Log filter for dependencies (the crate itself logs at
//!   `observability.logging.level`)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use pegged_order_engine::application::services::{EngineConfig, PeggedOrderEngine};
use pegged_order_engine::config::{
    Config, ConfigError, DEFAULT_CONFIG_PATH, LoggingConfig, load_config,
};
use pegged_order_engine::domain::pegging::PegOffset;
use pegged_order_engine::domain::shared::Symbol;
use pegged_order_engine::infrastructure::simulation::{RandomWalkQuotes, SimulatedVenue};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// How long to wait for the engine to settle after an interrupt.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path =
        std::env::var("PEG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let (config, missing_file) = match load_config(Some(&config_path)) {
        Ok(config) => (config, false),
        Err(ConfigError::ReadError { .. }) => (Config::default(), true),
        Err(e) => return Err(e).context("invalid configuration"),
    };

    init_tracing(&config.observability.logging)?;

    let run_id = uuid::Uuid::new_v4();

    if missing_file {
        tracing::warn!(path = %config_path, "Config file not found, using defaults");
    }

    let fields = config.order.to_order_fields();
    let offset = PegOffset::new(config.peg.offset).context("invalid peg offset")?;

    tracing::info!(
        %run_id,
        symbol = %fields.symbol,
        side = %fields.side,
        quantity = %fields.quantity,
        offset = %offset.amount(),
        "Starting Pegged Order Engine"
    );

    let venue = Arc::new(SimulatedVenue::new());
    let quotes_shutdown = CancellationToken::new();
    let sim = &config.simulation;
    let quotes = RandomWalkQuotes::new(
        Symbol::new(&config.order.symbol),
        sim.initial_bid,
        sim.spread,
        sim.tick,
        sim.seed,
    )
    .spawn(
        Arc::clone(&venue),
        Duration::from_millis(sim.step_interval_ms),
        sim.max_steps,
        quotes_shutdown.clone(),
    );

    let engine = PeggedOrderEngine::with_config(
        EngineConfig {
            order_id_prefix: config.peg.order_id_prefix.clone(),
            ..EngineConfig::default()
        },
        fields,
        offset,
        Arc::clone(&venue),
        Arc::clone(&venue),
    )?;
    engine.start();

    let outcome = tokio::select! {
        outcome = engine.await_completion() => outcome,
        () = shutdown_signal() => {
            tracing::info!("Interrupt received, closing the session");
            // Quotes stop first so nothing reprices; a resubmission already
            // under way is rejected by the closed session.
            quotes_shutdown.cancel();
            venue.end_session();
            tokio::time::timeout(SHUTDOWN_TIMEOUT, engine.await_completion())
                .await
                .context("engine did not settle after interrupt")?
        }
    };

    quotes_shutdown.cancel();
    if let Err(e) = quotes.await {
        tracing::warn!(error = %e, "Quote simulation task failed");
    }

    let completion = outcome?;
    tracing::info!(
        %run_id,
        summary = %serde_json::to_string(&completion)?,
        "Pegged Order Engine finished"
    );

    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// The crate's own level comes from configuration; `RUST_LOG` governs the rest.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        format!("pegged_order_engine={}", logging.level)
            .parse()
            .context("invalid observability.logging.level")?,
    );

    if logging.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init();
    }

    Ok(())
}

/// Wait for an interrupt (SIGINT, or SIGTERM on unix).
///
/// If a handler cannot be installed the corresponding branch never resolves.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
