//! The ephemeris provider: timestamp in, [`CelestialSnapshot`] out.

use astral_types::CelestialSnapshot;
use serde::Deserialize;
use tracing::{info, warn};

use crate::calendar::{Calendar, FixedOffsetCalendar, OUT_OF_RANGE_DAY};
use crate::{lunar, planets};

/// Errors raised by the ephemeris.
#[derive(Debug, thiserror::Error)]
pub enum EphemerisError {
    /// The configured UTC offset is a full day or more.
    #[error("invalid UTC offset: {seconds}s (must be within +/- 86399s)")]
    InvalidUtcOffset {
        /// The rejected offset.
        seconds: i32,
    },

    /// An online sync was requested while running offline.
    #[error("cannot sync: ephemeris is in offline mode")]
    NotOnline,
}

/// Where the ephemeris would source its data from.
///
/// Snapshots are always computed by the deterministic model; `Online` only
/// changes what [`Ephemeris::sync_online`] reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisMode {
    /// Deterministic simulation only.
    #[default]
    Offline,
    /// External sources requested.
    Online,
}

/// Valid `numerology_day` values.
const DAY_RANGE: core::ops::RangeInclusive<u8> = 1..=31;

/// Deterministic celestial state model.
#[derive(Debug, Clone)]
pub struct Ephemeris<C = FixedOffsetCalendar> {
    mode: EphemerisMode,
    calendar: C,
}

impl Ephemeris<FixedOffsetCalendar> {
    /// Offline ephemeris with a UTC calendar.
    pub fn offline() -> Self {
        Self::new(EphemerisMode::Offline, FixedOffsetCalendar::utc())
    }
}

impl<C: Calendar> Ephemeris<C> {
    /// Create an ephemeris with the given mode and calendar policy.
    pub fn new(mode: EphemerisMode, calendar: C) -> Self {
        match mode {
            EphemerisMode::Offline => info!("Ephemeris awakening in offline mode"),
            EphemerisMode::Online => {
                info!("Ephemeris awakening in online mode, deterministic model remains authoritative");
            }
        }
        Self { mode, calendar }
    }

    /// The configured mode.
    pub const fn mode(&self) -> EphemerisMode {
        self.mode
    }

    /// The calendar used for `numerology_day`.
    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Compute the celestial snapshot at `timestamp`.
    ///
    /// Pure: the same timestamp always produces an identical snapshot.
    /// A calendar day outside `1..=31` is logged and replaced with day 1.
    pub fn snapshot_at(&self, timestamp: i64) -> CelestialSnapshot {
        let fraction = lunar::phase_fraction(timestamp);
        CelestialSnapshot {
            timestamp,
            moon_phase: lunar::phase_for_fraction(fraction),
            moon_illumination: lunar::illumination(fraction),
            numerology_day: self.numerology_day(timestamp),
            planets: planets::positions_at(timestamp),
        }
    }

    fn numerology_day(&self, timestamp: i64) -> u8 {
        let day = self.calendar.day_of_month(timestamp);
        if DAY_RANGE.contains(&day) {
            return day;
        }
        warn!(timestamp, day, fallback = OUT_OF_RANGE_DAY, "Calendar day out of range");
        OUT_OF_RANGE_DAY
    }

    /// Synchronize with external sources.
    ///
    /// There is no external source; in online mode this logs the fallback
    /// and succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EphemerisError::NotOnline`] in offline mode.
    pub fn sync_online(&self) -> Result<(), EphemerisError> {
        match self.mode {
            EphemerisMode::Offline => Err(EphemerisError::NotOnline),
            EphemerisMode::Online => {
                info!("No external ephemeris source available, using deterministic model");
                Ok(())
            }
        }
    }
}
