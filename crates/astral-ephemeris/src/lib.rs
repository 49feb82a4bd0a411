//! Deterministic celestial state model for the SpiritOS astral core.
//!
//! The ephemeris maps a timestamp to a [`CelestialSnapshot`]: lunar phase
//! and illumination, calendar day, and simulated positions for ten bodies.
//! Everything except the calendar day is astral policy and lives here as
//! pure functions. The calendar day is delegated to a [`Calendar`]
//! implementation supplied by the caller.
//!
//! No attempt is made at astronomical accuracy. The model is a fixed set
//! of circular periods measured from fixed epochs, chosen so that the same
//! timestamp always yields the same snapshot.
//!
//! # Modules
//!
//! - [`calendar`] -- The [`Calendar`] trait and a chrono-backed fixed-offset
//!   implementation.
//! - [`lunar`] -- Phase fraction, phase bucketing, illumination.
//! - [`planets`] -- Orbital periods and simulated ecliptic positions.
//! - [`provider`] -- [`Ephemeris`], which combines the above into snapshots.
//!
//! [`CelestialSnapshot`]: astral_types::CelestialSnapshot

pub mod calendar;
pub mod lunar;
pub mod planets;
pub mod provider;

pub use calendar::{Calendar, FixedOffsetCalendar};
pub use provider::{Ephemeris, EphemerisError, EphemerisMode};
