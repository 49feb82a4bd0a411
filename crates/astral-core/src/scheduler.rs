//! Tick scheduler: one evaluation cycle of the astral core.
//!
//! Each cycle:
//!
//! 1. **Observe** -- read "now" from the [`ClockSource`] and compute the
//!    celestial snapshot.
//! 2. **Evaluate** -- check every active trigger's condition, in registry
//!    order, collecting the ones that fire.
//! 3. **Advance** -- increment the global astral tick by exactly one.
//! 4. **Attune** -- recompute the astral priority of every living soul.
//! 5. **Report** -- log the cycle and each fired trigger, and return them.
//!
//! Firing a trigger does not invoke its action target; that is left to
//! whoever consumes the [`CycleReport`].
//!
//! A cycle is all-or-nothing. If the clock cannot produce an instant, no
//! trigger is evaluated and the tick does not move.

use astral_destiny::condition;
use astral_ephemeris::Calendar;
use astral_types::{CelestialSnapshot, ExecutionMode, TriggerDefinition};
use tracing::{debug, info, warn};

use crate::clock::{ClockError, ClockSource};
use crate::context::AstralContext;
use crate::lifecycle::LifecycleError;

/// Errors that abort a cycle. A failed cycle changes no state.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// The clock source could not produce an instant.
    #[error("clock unavailable: {source}")]
    ClockUnavailable {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The global tick could not advance.
    #[error("lifecycle error: {source}")]
    Lifecycle {
        /// The underlying lifecycle error.
        #[from]
        source: LifecycleError,
    },
}

/// A trigger that fired during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTrigger {
    /// Trigger name.
    pub name: String,
    /// Handler the collaborator should invoke.
    pub action_target: String,
    /// Advisory execution policy for the handler.
    pub mode: ExecutionMode,
}

impl From<&TriggerDefinition> for FiredTrigger {
    fn from(trigger: &TriggerDefinition) -> Self {
        Self {
            name: trigger.name.clone(),
            action_target: trigger.action_target.clone(),
            mode: trigger.mode,
        }
    }
}

/// Outcome of one successful cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// The global tick after this cycle advanced it.
    pub tick: u64,
    /// The snapshot the triggers were evaluated against.
    pub snapshot: CelestialSnapshot,
    /// Fired triggers, in registry order.
    pub fired: Vec<FiredTrigger>,
}

impl CycleReport {
    /// Names of the fired triggers, in registry order.
    pub fn fired_names(&self) -> Vec<&str> {
        self.fired.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Run one cycle against the context.
///
/// # Errors
///
/// - [`CycleError::ClockUnavailable`] if the clock fails. Nothing is
///   evaluated and the tick is unchanged.
/// - [`CycleError::Lifecycle`] if the tick counter is exhausted. The
///   evaluation result is discarded and nothing is reported.
pub fn run_cycle<C: Calendar>(
    ctx: &mut AstralContext<C>,
    clock: &mut dyn ClockSource,
) -> Result<CycleReport, CycleError> {
    // --- Observe ---
    let now = clock.now().inspect_err(|err| {
        warn!(tick = ctx.current_tick(), error = %err, "Cycle aborted: no celestial data");
    })?;
    let snapshot = ctx.ephemeris().snapshot_at(now);

    // --- Evaluate ---
    let fired: Vec<FiredTrigger> = ctx
        .registry()
        .active()
        .filter(|trigger| condition::evaluate(&trigger.condition, &snapshot))
        .map(FiredTrigger::from)
        .collect();

    // --- Advance ---
    let tick = ctx.souls_mut().tick()?;

    // --- Attune ---
    ctx.souls_mut().refresh_priorities(&snapshot);

    // --- Report ---
    info!(
        tick,
        timestamp = snapshot.timestamp,
        moon_phase = snapshot.moon_phase.display_name(),
        illumination_pct = snapshot.moon_illumination * 100.0,
        numerology_day = snapshot.numerology_day,
        fired = fired.len(),
        "Cosmic tick"
    );
    for trigger in &fired {
        info!(
            tick,
            trigger = %trigger.name,
            action_target = %trigger.action_target,
            mode = ?trigger.mode,
            "Trigger awakened"
        );
    }
    debug!(tick, living_souls = ctx.souls().living().count(), "Souls attuned");

    Ok(CycleReport {
        tick,
        snapshot,
        fired,
    })
}
