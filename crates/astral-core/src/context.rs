//! The astral context: every piece of process-wide state, in one owned value.
//!
//! An [`AstralContext`] is built once at startup (or per test), passed by
//! reference to every operation, and reset explicitly. It is not
//! internally synchronized; share it behind a single lock if more than one
//! thread needs it.

use astral_destiny::{DestinyError, TriggerRegistry};
use astral_ephemeris::{Calendar, Ephemeris, EphemerisError, FixedOffsetCalendar};
use tracing::info;

use crate::config::{AstralConfig, TriggerSeed};
use crate::lifecycle::SoulTable;

/// Errors that can occur while building a context from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// The ephemeris configuration is invalid.
    #[error("ephemeris error: {source}")]
    Ephemeris {
        /// The underlying ephemeris error.
        #[from]
        source: EphemerisError,
    },

    /// A configured trigger could not be registered.
    #[error("trigger seed error: {source}")]
    Trigger {
        /// The underlying registry error.
        #[from]
        source: DestinyError,
    },
}

/// Ephemeris, trigger registry, and soul table for one run.
#[derive(Debug)]
pub struct AstralContext<C = FixedOffsetCalendar> {
    ephemeris: Ephemeris<C>,
    registry: TriggerRegistry,
    souls: SoulTable,
}

impl AstralContext<FixedOffsetCalendar> {
    /// Build a context from configuration and register its seed triggers.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Ephemeris`] for an invalid UTC offset and
    /// [`ContextError::Trigger`] if a seed trigger is rejected.
    pub fn from_config(config: &AstralConfig) -> Result<Self, ContextError> {
        let calendar = FixedOffsetCalendar::new(config.ephemeris.utc_offset_seconds)?;
        let mut ctx = Self::new(Ephemeris::new(config.ephemeris.mode, calendar));
        let seeded = ctx.seed_triggers(&config.triggers)?;
        info!(seeded, "Astral context initialized");
        Ok(ctx)
    }
}

impl<C: Calendar> AstralContext<C> {
    /// A context with an empty registry and soul table at tick 0.
    pub fn new(ephemeris: Ephemeris<C>) -> Self {
        Self {
            ephemeris,
            registry: TriggerRegistry::new(),
            souls: SoulTable::new(),
        }
    }

    /// Register each seed in order. Returns how many were registered.
    ///
    /// # Errors
    ///
    /// Stops at the first rejected seed; earlier seeds stay registered.
    pub fn seed_triggers(&mut self, seeds: &[TriggerSeed]) -> Result<usize, DestinyError> {
        for seed in seeds {
            self.registry.add(
                seed.name.as_str(),
                seed.condition.as_str(),
                seed.action_target.as_str(),
                seed.mode,
            )?;
        }
        Ok(seeds.len())
    }

    /// The celestial state model.
    pub const fn ephemeris(&self) -> &Ephemeris<C> {
        &self.ephemeris
    }

    /// The trigger registry.
    pub const fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Mutable access to the trigger registry.
    pub const fn registry_mut(&mut self) -> &mut TriggerRegistry {
        &mut self.registry
    }

    /// The soul table.
    pub const fn souls(&self) -> &SoulTable {
        &self.souls
    }

    /// Mutable access to the soul table.
    pub const fn souls_mut(&mut self) -> &mut SoulTable {
        &mut self.souls
    }

    /// The global astral tick.
    pub const fn current_tick(&self) -> u64 {
        self.souls.current_tick()
    }

    /// Reinitialize: drop every trigger and soul and return to tick 0.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.souls.reset();
        info!("Astral context reset");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_config_seeds_demo_triggers() {
        let ctx = AstralContext::from_config(&AstralConfig::default_with_triggers()).unwrap();
        let names: Vec<&str> = ctx.registry().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["full_moon_ritual", "new_moon_ritual", "lucky_seven"]);
        assert_eq!(ctx.current_tick(), 0);
    }

    #[test]
    fn from_config_rejects_bad_offset() {
        let mut config = AstralConfig::default();
        config.ephemeris.utc_offset_seconds = 90_000;
        assert!(matches!(
            AstralContext::from_config(&config),
            Err(ContextError::Ephemeris { .. })
        ));
    }

    #[test]
    fn duplicate_seed_is_reported() {
        let mut config = AstralConfig::default_with_triggers();
        let first = config.triggers[0].clone();
        config.triggers.push(first);
        assert!(matches!(
            AstralContext::from_config(&config),
            Err(ContextError::Trigger {
                source: DestinyError::DuplicateName(_)
            })
        ));
    }

    #[test]
    fn reset_reinitializes_everything() {
        let mut ctx = AstralContext::from_config(&AstralConfig::default_with_triggers()).unwrap();
        ctx.souls_mut().create("soul", "").unwrap();
        ctx.souls_mut().tick().unwrap();
        ctx.reset();
        assert!(ctx.registry().is_empty());
        assert!(ctx.souls().is_empty());
        assert_eq!(ctx.current_tick(), 0);
    }
}
