//! Soul lifecycle table and the global astral tick.
//!
//! The table tracks metadata only: which souls exist, what state they are
//! in, and their astral priority. It knows nothing about memory or CPU
//! context.
//!
//! # Invariants
//!
//! - Ids start at 1 and are never reused within a run. Slot 0 is reserved,
//!   so a table of [`MAX_SOULS`] slots holds at most `MAX_SOULS - 1` souls.
//! - `Death` is terminal. Once a soul has departed, its state is never
//!   written again.
//! - `birth_tick` is fixed at creation.
//! - The tick counter only moves forward, one step per [`SoulTable::tick`],
//!   and only [`SoulTable::reset`] returns it to 0.

use astral_destiny::priority;
use astral_types::{CelestialSnapshot, SoulEntry, SoulId, SoulState, SpiritMetadata};
use tracing::info;

/// Number of slots in the soul table, including the reserved slot 0.
pub const MAX_SOULS: usize = 256;

/// Maximum ritual tag length in characters.
pub const MAX_RITUAL_TAG_LEN: usize = 63;

/// Maximum trigger conditions length in characters.
pub const MAX_TRIGGER_CONDITIONS_LEN: usize = 255;

/// Lunar affinity every soul is born with.
const NEUTRAL_MOON_AFFINITY: f32 = 0.5;

/// Errors raised by soul table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// Every usable slot has been handed out.
    #[error("soul table full: no more souls can be born (capacity {capacity})")]
    CapacityExceeded {
        /// Number of souls the table can hold.
        capacity: usize,
    },

    /// The id is 0 or beyond the table, or a field is too long.
    #[error("out of range: {what}")]
    InvalidRange {
        /// What was out of range.
        what: String,
    },

    /// The id is within range but no soul was born in that slot.
    #[error("soul not found: {0}")]
    NotFound(SoulId),

    /// The soul has already departed.
    #[error("soul {0} has already departed")]
    AlreadyDead(SoulId),

    /// The requested state change is not allowed.
    #[error("soul {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The soul.
        id: SoulId,
        /// Its current state.
        from: SoulState,
        /// The requested state.
        to: SoulState,
    },

    /// The tick counter would overflow.
    #[error("astral tick overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Fixed-capacity table of souls plus the global astral tick counter.
#[derive(Debug, Clone)]
pub struct SoulTable {
    /// Entry `i` holds the soul with id `i + 1`.
    souls: Vec<SoulEntry>,
    tick: u64,
}

impl Default for SoulTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SoulTable {
    /// An empty table at tick 0.
    pub fn new() -> Self {
        Self {
            souls: Vec::with_capacity(Self::capacity()),
            tick: 0,
        }
    }

    /// Number of souls the table can hold over a run.
    pub const fn capacity() -> usize {
        MAX_SOULS.saturating_sub(1)
    }

    /// Bring a new soul into being, in [`SoulState::Birth`].
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::InvalidRange`] if a field exceeds its length limit.
    /// - [`LifecycleError::CapacityExceeded`] if every id has been used.
    pub fn create(
        &mut self,
        ritual_tag: &str,
        trigger_conditions: &str,
    ) -> Result<SoulId, LifecycleError> {
        check_len("ritual_tag", ritual_tag, MAX_RITUAL_TAG_LEN)?;
        check_len("trigger_conditions", trigger_conditions, MAX_TRIGGER_CONDITIONS_LEN)?;

        if self.souls.len() >= Self::capacity() {
            return Err(LifecycleError::CapacityExceeded {
                capacity: Self::capacity(),
            });
        }
        let next = self.souls.len().saturating_add(1);
        let id = u32::try_from(next).map(SoulId).map_err(|_err| {
            LifecycleError::InvalidRange {
                what: format!("soul id {next}"),
            }
        })?;

        self.souls.push(SoulEntry {
            id,
            state: SoulState::Birth,
            spirit: SpiritMetadata {
                moon_affinity: NEUTRAL_MOON_AFFINITY,
                ritual_tag: ritual_tag.to_owned(),
                base_priority: 0,
                astral_priority: 0,
                trigger_conditions: trigger_conditions.to_owned(),
            },
            birth_tick: self.tick,
        });
        info!(soul = %id, ritual = ritual_tag, birth_tick = self.tick, "New soul born");
        Ok(id)
    }

    /// Move a soul to [`SoulState::Death`].
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::InvalidRange`] for id 0 or ids beyond the table.
    /// - [`LifecycleError::NotFound`] if the slot was never used.
    /// - [`LifecycleError::AlreadyDead`] if the soul already departed.
    pub fn destroy(&mut self, id: SoulId) -> Result<(), LifecycleError> {
        let soul = self.living_mut(id)?;
        soul.state = SoulState::Death;
        info!(soul = %id, "Soul departed");
        Ok(())
    }

    /// Look up a soul.
    pub fn get(&self, id: SoulId) -> Option<&SoulEntry> {
        self.souls.get(slot(id)?)
    }

    /// Move a living soul to `Executing` or `Dormant`.
    ///
    /// `Birth` can never be re-entered and `Death` is reached only through
    /// [`destroy`](Self::destroy).
    ///
    /// # Errors
    ///
    /// The lookup errors of [`destroy`](Self::destroy), or
    /// [`LifecycleError::InvalidTransition`] for a target of `Birth` or
    /// `Death`.
    pub fn transition(&mut self, id: SoulId, to: SoulState) -> Result<(), LifecycleError> {
        let soul = self.living_mut(id)?;
        let from = soul.state;
        if matches!(to, SoulState::Birth | SoulState::Death) {
            return Err(LifecycleError::InvalidTransition { id, from, to });
        }
        soul.state = to;
        info!(soul = %id, %from, %to, "Soul state changed");
        Ok(())
    }

    /// Set the base priority used when astral priority is recomputed.
    ///
    /// # Errors
    ///
    /// The lookup errors of [`destroy`](Self::destroy).
    pub fn set_base_priority(&mut self, id: SoulId, base: i64) -> Result<(), LifecycleError> {
        self.living_mut(id)?.spirit.base_priority = base;
        Ok(())
    }

    /// Recompute one soul's astral priority from `base` and `snapshot`.
    ///
    /// Also records `base` as the soul's base priority. Returns the new
    /// astral priority.
    ///
    /// # Errors
    ///
    /// The lookup errors of [`destroy`](Self::destroy).
    pub fn apply_astral_priority(
        &mut self,
        id: SoulId,
        base: i64,
        snapshot: &CelestialSnapshot,
    ) -> Result<i64, LifecycleError> {
        let soul = self.living_mut(id)?;
        soul.spirit.base_priority = base;
        soul.spirit.astral_priority = priority::score(base, snapshot);
        Ok(soul.spirit.astral_priority)
    }

    /// Recompute the astral priority of every living soul from its own base.
    pub fn refresh_priorities(&mut self, snapshot: &CelestialSnapshot) {
        for soul in self.souls.iter_mut().filter(|s| s.is_alive()) {
            soul.spirit.astral_priority = priority::score(soul.spirit.base_priority, snapshot);
        }
    }

    /// Living souls in id order.
    pub fn living(&self) -> impl Iterator<Item = &SoulEntry> {
        self.souls.iter().filter(|s| s.is_alive())
    }

    /// Every soul ever born this run, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SoulEntry> {
        self.souls.iter()
    }

    /// Number of souls ever born this run (living or departed).
    pub fn len(&self) -> usize {
        self.souls.len()
    }

    /// Whether no soul has been born this run.
    pub fn is_empty(&self) -> bool {
        self.souls.is_empty()
    }

    /// Advance the global astral tick by one. Returns the new tick.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TickOverflow`] at `u64::MAX`.
    pub fn tick(&mut self) -> Result<u64, LifecycleError> {
        self.tick = self.tick.checked_add(1).ok_or(LifecycleError::TickOverflow)?;
        Ok(self.tick)
    }

    /// The current global astral tick.
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Forget every soul and return the tick counter to 0.
    pub fn reset(&mut self) {
        self.souls.clear();
        self.tick = 0;
    }

    /// Mutable access to a soul that has not departed.
    fn living_mut(&mut self, id: SoulId) -> Result<&mut SoulEntry, LifecycleError> {
        let index = slot(id).ok_or_else(|| LifecycleError::InvalidRange {
            what: format!("soul id {id} (valid ids are 1..{MAX_SOULS})"),
        })?;
        let soul = self
            .souls
            .get_mut(index)
            .ok_or(LifecycleError::NotFound(id))?;
        if soul.state.is_terminal() {
            return Err(LifecycleError::AlreadyDead(id));
        }
        Ok(soul)
    }
}

/// Storage index for `id`, or `None` for id 0 and ids beyond the table.
fn slot(id: SoulId) -> Option<usize> {
    let raw = usize::try_from(id.into_inner()).ok()?;
    if raw >= MAX_SOULS {
        return None;
    }
    raw.checked_sub(1)
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), LifecycleError> {
    let len = value.chars().count();
    if len > max {
        return Err(LifecycleError::InvalidRange {
            what: format!("{field} is {len} characters, maximum is {max}"),
        });
    }
    Ok(())
}
