//! Bounded tick loop around [`run_cycle`].
//!
//! [`run_bounded`] drives one cycle per tick interval until `max_ticks`
//! cycles have been attempted. It adds the control plane the scheduler
//! itself does not have:
//!
//! - **Pacing**: sleeps for the tick interval between cycles.
//! - **Clock tolerance**: a cycle aborted for lack of a clock reading is
//!   logged and skipped; the loop keeps going.
//! - **Heartbeat**: a status line every [`HEARTBEAT_INTERVAL`] attempts.
//! - **Observation**: every successful [`CycleReport`] is handed to a
//!   [`CycleObserver`], which is where action targets get invoked.
//!
//! [`run_cycle`]: crate::scheduler::run_cycle

use std::time::Duration;

use astral_ephemeris::Calendar;
use tracing::{info, warn};

use crate::clock::ClockSource;
use crate::config::SchedulerConfig;
use crate::context::AstralContext;
use crate::scheduler::{self, CycleError, CycleReport};

/// Attempts between heartbeat log lines.
pub const HEARTBEAT_INTERVAL: u64 = 12;

/// Errors that end the loop early.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A cycle failed for a reason other than the clock.
    #[error("cycle error: {source}")]
    Cycle {
        /// The underlying cycle error.
        #[from]
        source: CycleError,
    },
}

/// Loop bounds and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Cycles to attempt before stopping (0 = unlimited).
    pub max_ticks: u64,
    /// Real time between cycles.
    pub tick_interval: Duration,
}

impl From<&SchedulerConfig> for RunBounds {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            max_ticks: config.max_ticks,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
        }
    }
}

/// Callback invoked after each successful cycle.
pub trait CycleObserver: Send {
    /// Called with the report of a completed cycle.
    fn on_cycle(&mut self, report: &CycleReport);
}

/// An observer that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl CycleObserver for NoOpObserver {
    fn on_cycle(&mut self, _report: &CycleReport) {}
}

/// What happened over a bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles attempted.
    pub attempted: u64,
    /// Cycles that completed.
    pub completed: u64,
    /// Cycles skipped because the clock was unavailable.
    pub clock_failures: u64,
    /// Triggers fired across all completed cycles.
    pub fired_total: u64,
    /// The global astral tick when the loop stopped.
    pub final_tick: u64,
}

/// Run cycles until `bounds.max_ticks` attempts have been made.
///
/// # Errors
///
/// Returns [`RunnerError::Cycle`] if a cycle fails for any reason other
/// than an unavailable clock.
pub async fn run_bounded<C: Calendar>(
    ctx: &mut AstralContext<C>,
    clock: &mut dyn ClockSource,
    bounds: RunBounds,
    observer: &mut dyn CycleObserver,
) -> Result<RunSummary, RunnerError> {
    let mut summary = RunSummary {
        attempted: 0,
        completed: 0,
        clock_failures: 0,
        fired_total: 0,
        final_tick: ctx.current_tick(),
    };

    info!(
        max_ticks = bounds.max_ticks,
        tick_interval_ms = u64::try_from(bounds.tick_interval.as_millis()).unwrap_or(u64::MAX),
        triggers = ctx.registry().len(),
        "Entering cosmic tick loop"
    );

    while bounds.max_ticks == 0 || summary.attempted < bounds.max_ticks {
        if summary.attempted > 0 && !bounds.tick_interval.is_zero() {
            tokio::time::sleep(bounds.tick_interval).await;
        }
        summary.attempted = summary.attempted.saturating_add(1);

        match scheduler::run_cycle(ctx, clock) {
            Ok(report) => {
                summary.completed = summary.completed.saturating_add(1);
                let fired = u64::try_from(report.fired.len()).unwrap_or(u64::MAX);
                summary.fired_total = summary.fired_total.saturating_add(fired);
                observer.on_cycle(&report);
            }
            Err(CycleError::ClockUnavailable { source }) => {
                summary.clock_failures = summary.clock_failures.saturating_add(1);
                warn!(attempt = summary.attempted, error = %source, "Skipping cycle");
            }
            Err(other) => return Err(other.into()),
        }

        if summary.attempted.checked_rem(HEARTBEAT_INTERVAL) == Some(0) {
            info!(
                attempts = summary.attempted,
                astral_tick = ctx.current_tick(),
                "Cosmic heartbeat"
            );
        }
    }

    summary.final_tick = ctx.current_tick();
    info!(
        completed = summary.completed,
        clock_failures = summary.clock_failures,
        fired_total = summary.fired_total,
        final_tick = summary.final_tick,
        "Cosmic tick loop finished"
    );
    Ok(summary)
}
