//! Core value structs: celestial snapshots, trigger definitions, souls.

use serde::{Deserialize, Serialize};

use crate::enums::{ExecutionMode, MoonPhase, Planet, SoulState, ZodiacSign};
use crate::ids::SoulId;

// ---------------------------------------------------------------------------
// Celestial state
// ---------------------------------------------------------------------------

/// Simulated position of one body on the ecliptic.
///
/// Serializes as `{"name": "Mars", "sign": "Scorpio", "degree": 221.4}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// The body.
    pub name: Planet,
    /// Zodiac sign containing [`degree`](Self::degree).
    pub sign: ZodiacSign,
    /// Ecliptic longitude in `[0, 360)`.
    pub degree: f64,
}

/// Immutable celestial state computed for a single instant.
///
/// Every field is a pure function of [`timestamp`](Self::timestamp) (and the
/// calendar policy used for [`numerology_day`](Self::numerology_day)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialSnapshot {
    /// Seconds since the Unix epoch. May be negative.
    pub timestamp: i64,
    /// Named lunar phase.
    pub moon_phase: MoonPhase,
    /// Lit fraction of the lunar disc in `[0.0, 1.0]`.
    pub moon_illumination: f64,
    /// Calendar day of month, `1..=31`.
    pub numerology_day: u8,
    /// Up to ten body positions in [`Planet::ALL`] order.
    pub planets: Vec<PlanetPosition>,
}

impl CelestialSnapshot {
    /// Position of `planet`, if the snapshot carries it.
    pub fn planet(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.name == planet)
    }
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// A named condition-to-action binding owned by the trigger registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Unique key within the registry.
    pub name: String,
    /// Condition text, evaluated against each cycle's snapshot.
    pub condition: String,
    /// Opaque handler path or id to invoke when the trigger fires.
    pub action_target: String,
    /// Advisory execution policy.
    pub mode: ExecutionMode,
    /// Inactive triggers are stored but never evaluated.
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Souls
// ---------------------------------------------------------------------------

/// Descriptive metadata attached to a soul.
///
/// `ritual_tag` and `trigger_conditions` are carried for collaborators;
/// the lifecycle table never evaluates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritMetadata {
    /// Affinity to lunar cycles in `[0.0, 1.0]`. Souls are born neutral (0.5).
    pub moon_affinity: f32,
    /// Tag identifying the ritual type.
    pub ritual_tag: String,
    /// Base priority fed to the priority model each cycle.
    pub base_priority: i64,
    /// Most recently computed astral priority.
    pub astral_priority: i64,
    /// Awakening condition text.
    pub trigger_conditions: String,
}

/// One tracked soul.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoulEntry {
    /// Monotonically assigned id, never reused within a run.
    pub id: SoulId,
    /// Current lifecycle state.
    pub state: SoulState,
    /// Spiritual metadata.
    pub spirit: SpiritMetadata,
    /// Global tick at creation.
    pub birth_tick: u64,
}

impl SoulEntry {
    /// Whether the soul has not yet departed.
    pub const fn is_alive(&self) -> bool {
        !self.state.is_terminal()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_snapshot() -> CelestialSnapshot {
        CelestialSnapshot {
            timestamp: 0,
            moon_phase: MoonPhase::WaxingGibbous,
            moon_illumination: 0.75,
            numerology_day: 1,
            planets: vec![
                PlanetPosition {
                    name: Planet::Sun,
                    sign: ZodiacSign::Aries,
                    degree: 12.5,
                },
                PlanetPosition {
                    name: Planet::Mars,
                    sign: ZodiacSign::Scorpio,
                    degree: 221.0,
                },
            ],
        }
    }

    #[test]
    fn planet_lookup_by_body() {
        let snapshot = sample_snapshot();
        assert_eq!(
            snapshot.planet(Planet::Mars).map(|p| p.sign),
            Some(ZodiacSign::Scorpio)
        );
        assert!(snapshot.planet(Planet::Pluto).is_none());
    }

    #[test]
    fn planet_positions_render_as_json_objects() {
        let snapshot = sample_snapshot();
        let json = serde_json::to_value(&snapshot.planets).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "Sun", "sign": "Aries", "degree": 12.5},
                {"name": "Mars", "sign": "Scorpio", "degree": 221.0},
            ])
        );
    }
}
