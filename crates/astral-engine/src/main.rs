//! Astral core daemon for SpiritOS.
//!
//! Wires the configuration, ephemeris, trigger registry, and soul table
//! into one context and runs the cosmic tick loop until `max_ticks`
//! cycles have been attempted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$ASTRAL_CONFIG` or `astral-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the astral context and seed triggers
//! 4. Pick the clock: simulated stepping clock or wall clock
//! 5. Run the bounded tick loop with the dispatch observer
//! 6. Log the result

mod dispatch;
mod error;

use std::path::PathBuf;

use astral_core::clock::{ClockSource, ManualClock, SystemClock};
use astral_core::config::{AstralConfig, LogFormat, LoggingConfig};
use astral_core::context::AstralContext;
use astral_core::runner::{self, RunBounds};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::dispatch::DispatchObserver;
use crate::error::EngineError;

/// Application entry point for the astral engine.
///
/// # Errors
///
/// Returns an error if configuration, context construction, or the tick
/// loop fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration. Logging depends on it, so this comes first.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    info!("astral-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        ephemeris_mode = ?config.ephemeris.mode,
        utc_offset_seconds = config.ephemeris.utc_offset_seconds,
        tick_interval_ms = config.scheduler.tick_interval_ms,
        max_ticks = config.scheduler.max_ticks,
        triggers = config.triggers.len(),
        "Configuration loaded"
    );

    // 3. Build the context.
    let mut ctx = AstralContext::from_config(&config)?;
    for trigger in ctx.registry().iter() {
        info!(
            trigger = %trigger.name,
            condition = %trigger.condition,
            action_target = %trigger.action_target,
            "Trigger registered"
        );
    }
    info!("Astral core online, awaiting cosmic alignment");

    // 4. Pick the clock.
    let mut clock: Box<dyn ClockSource> = match config.scheduler.simulated_start {
        Some(start) => {
            info!(
                start,
                step_seconds = config.scheduler.simulated_step_seconds,
                "Using simulated clock"
            );
            Box::new(ManualClock::stepping(
                start,
                config.scheduler.simulated_step_seconds,
            ))
        }
        None => Box::new(SystemClock),
    };

    // 5. Run the loop.
    let mut observer = DispatchObserver::new();
    let summary = runner::run_bounded(
        &mut ctx,
        clock.as_mut(),
        RunBounds::from(&config.scheduler),
        &mut observer,
    )
    .await?;

    // 6. Log results.
    info!(
        cycles = summary.completed,
        clock_failures = summary.clock_failures,
        fired = summary.fired_total,
        dispatched = observer.dispatched(),
        observed_only = observer.observed_only(),
        final_tick = summary.final_tick,
        "astral-engine shutdown complete"
    );

    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the config and whether a file was found.
fn load_config() -> Result<(AstralConfig, bool), EngineError> {
    let config_path = std::env::var_os("ASTRAL_CONFIG")
        .map_or_else(|| PathBuf::from("astral-config.yaml"), PathBuf::from);
    if config_path.exists() {
        Ok((AstralConfig::from_file(&config_path)?, true))
    } else {
        Ok((AstralConfig::parse("")?, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the config level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| EngineError::Logging {
            level: logging.level.clone(),
            message: format!("{e}"),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
    Ok(())
}
