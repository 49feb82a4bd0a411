//! Shared type definitions for the SpiritOS astral core.
//!
//! Every crate in the workspace speaks in these types: the ephemeris
//! produces [`CelestialSnapshot`] values, the destiny engine stores
//! [`TriggerDefinition`] records, and the soul table tracks
//! [`SoulEntry`] metadata. Presentation layers render these values
//! directly (they all derive `Serialize`).
//!
//! # Modules
//!
//! - [`enums`] -- Moon phases, zodiac signs, planets, execution modes,
//!   soul states
//! - [`ids`] -- Monotonic soul identifiers
//! - [`structs`] -- Snapshots, trigger definitions, soul entries

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{ExecutionMode, MoonPhase, Planet, SoulState, ZodiacSign};
pub use ids::SoulId;
pub use structs::{CelestialSnapshot, PlanetPosition, SoulEntry, SpiritMetadata, TriggerDefinition};
