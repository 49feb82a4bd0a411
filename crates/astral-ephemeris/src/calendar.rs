//! Calendar conversion from instants to day-of-month.
//!
//! Which calendar day an instant falls on depends on timezone policy, not
//! astral policy, so the ephemeris takes it as a collaborator. Any
//! `Fn(i64) -> u8` works as a calendar; [`FixedOffsetCalendar`] is the
//! chrono-backed implementation the engine configures.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

use crate::provider::EphemerisError;

/// Day reported for instants outside chrono's representable range
/// (roughly +/- 262,000 years).
pub(crate) const OUT_OF_RANGE_DAY: u8 = 1;

/// Conversion from a Unix timestamp to a calendar day-of-month.
pub trait Calendar {
    /// Day of month (`1..=31`) on which `timestamp` falls.
    fn day_of_month(&self, timestamp: i64) -> u8;
}

impl<F> Calendar for F
where
    F: Fn(i64) -> u8,
{
    fn day_of_month(&self, timestamp: i64) -> u8 {
        self(timestamp)
    }
}

/// Gregorian calendar at a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetCalendar {
    offset: FixedOffset,
}

impl FixedOffsetCalendar {
    /// Calendar at `offset_seconds` east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`EphemerisError::InvalidUtcOffset`] if the offset is not
    /// strictly within one day of UTC.
    pub fn new(offset_seconds: i32) -> Result<Self, EphemerisError> {
        FixedOffset::east_opt(offset_seconds)
            .map(|offset| Self { offset })
            .ok_or(EphemerisError::InvalidUtcOffset {
                seconds: offset_seconds,
            })
    }

    /// Calendar in UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Offset from UTC in seconds.
    pub fn offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }
}

impl Default for FixedOffsetCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar for FixedOffsetCalendar {
    fn day_of_month(&self, timestamp: i64) -> u8 {
        DateTime::from_timestamp(timestamp, 0)
            .map(|utc| utc.with_timezone(&self.offset).day())
            .and_then(|day| u8::try_from(day).ok())
            .unwrap_or(OUT_OF_RANGE_DAY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// 2024-01-07 12:00:00 UTC.
    const JAN_7_NOON_UTC: i64 = 1_704_628_800;

    #[test]
    fn utc_day_of_month() {
        let cal = FixedOffsetCalendar::utc();
        assert_eq!(cal.day_of_month(JAN_7_NOON_UTC), 7);
        assert_eq!(cal.day_of_month(0), 1);
    }

    #[test]
    fn pre_epoch_timestamps_are_valid() {
        let cal = FixedOffsetCalendar::utc();
        // 1969-12-31 23:59:59 UTC
        assert_eq!(cal.day_of_month(-1), 31);
    }

    #[test]
    fn offset_shifts_the_day() {
        let west = FixedOffsetCalendar::new(-13 * 3600).unwrap();
        assert_eq!(west.day_of_month(JAN_7_NOON_UTC), 6);
        let east = FixedOffsetCalendar::new(13 * 3600).unwrap();
        assert_eq!(east.day_of_month(JAN_7_NOON_UTC), 8);
        assert_eq!(east.offset_seconds(), 13 * 3600);
    }

    #[test]
    fn offset_of_a_full_day_is_rejected() {
        assert!(FixedOffsetCalendar::new(86_400).is_err());
        assert!(FixedOffsetCalendar::new(-86_400).is_err());
    }

    #[test]
    fn unrepresentable_instant_falls_back() {
        let cal = FixedOffsetCalendar::utc();
        assert_eq!(cal.day_of_month(i64::MAX), OUT_OF_RANGE_DAY);
    }

    #[test]
    fn closures_are_calendars() {
        let always_seventh = |_ts: i64| 7_u8;
        assert_eq!(always_seventh.day_of_month(123), 7);
    }
}
