//! Cycle observer that hands fired triggers to their handlers.
//!
//! Handlers are not spawned here. Each fired trigger is logged as a
//! dispatch record carrying its action target and execution policy, for an
//! external invoker to pick up.

use astral_core::runner::CycleObserver;
use astral_core::scheduler::CycleReport;
use astral_types::ExecutionMode;
use tracing::{debug, info, warn};

/// Observer that records what would be dispatched each cycle.
#[derive(Debug, Default)]
pub struct DispatchObserver {
    dispatched: u64,
    observed_only: u64,
}

impl DispatchObserver {
    /// A fresh observer with zeroed counters.
    pub const fn new() -> Self {
        Self {
            dispatched: 0,
            observed_only: 0,
        }
    }

    /// Handlers handed off for execution.
    pub const fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Triggers that fired under [`ExecutionMode::ObserverOnly`].
    pub const fn observed_only(&self) -> u64 {
        self.observed_only
    }
}

impl CycleObserver for DispatchObserver {
    fn on_cycle(&mut self, report: &CycleReport) {
        match serde_json::to_string(&report.snapshot) {
            Ok(json) => debug!(tick = report.tick, snapshot = %json, "Celestial snapshot"),
            Err(e) => warn!(tick = report.tick, error = %e, "Snapshot not renderable"),
        }

        for trigger in &report.fired {
            match trigger.mode {
                ExecutionMode::ObserverOnly => {
                    self.observed_only = self.observed_only.saturating_add(1);
                    info!(
                        tick = report.tick,
                        trigger = %trigger.name,
                        "Omen observed, no handler run"
                    );
                }
                ExecutionMode::Native | ExecutionMode::Sandboxed => {
                    self.dispatched = self.dispatched.saturating_add(1);
                    info!(
                        tick = report.tick,
                        trigger = %trigger.name,
                        action_target = %trigger.action_target,
                        sandboxed = trigger.mode == ExecutionMode::Sandboxed,
                        "Dispatching handler"
                    );
                }
            }
        }
    }
}
