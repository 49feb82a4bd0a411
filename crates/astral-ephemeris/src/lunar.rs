//! Lunar phase model.
//!
//! The phase fraction is the position within the current synodic month,
//! measured from a fixed reference new moon: 0.0 is new, 0.5 is full.
//! The fraction is bucketed into eight equal 0.125-wide windows, the first
//! centered on 0.0 (so it wraps across the end of the cycle).

use astral_types::MoonPhase;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Reference new moon: 2000-01-06 18:14 UTC.
pub const REFERENCE_NEW_MOON: i64 = 947_182_440;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Upper window boundaries, paired with the phase each window belongs to.
/// Fractions at or above the last boundary wrap back to [`MoonPhase::New`].
const PHASE_WINDOWS: [(f64, MoonPhase); 8] = [
    (0.0625, MoonPhase::New),
    (0.1875, MoonPhase::WaxingCrescent),
    (0.3125, MoonPhase::FirstQuarter),
    (0.4375, MoonPhase::WaxingGibbous),
    (0.5625, MoonPhase::Full),
    (0.6875, MoonPhase::WaningGibbous),
    (0.8125, MoonPhase::LastQuarter),
    (0.9375, MoonPhase::WaningCrescent),
];

/// Days elapsed from `epoch` to `timestamp` (negative before the epoch).
#[allow(clippy::cast_precision_loss)]
pub fn days_since(epoch: i64, timestamp: i64) -> f64 {
    (timestamp as f64 - epoch as f64) / SECONDS_PER_DAY
}

/// Position within the synodic month at `timestamp`, in `[0, 1)`.
///
/// Uses a Euclidean remainder, so pre-epoch timestamps land in range too.
pub fn phase_fraction(timestamp: i64) -> f64 {
    let days = days_since(REFERENCE_NEW_MOON, timestamp);
    let fraction = days.rem_euclid(SYNODIC_MONTH_DAYS) / SYNODIC_MONTH_DAYS;
    // rem_euclid may round up to the divisor for tiny negative inputs.
    if fraction >= 1.0 { 0.0 } else { fraction }
}

/// Named phase for a phase fraction.
pub fn phase_for_fraction(fraction: f64) -> MoonPhase {
    PHASE_WINDOWS
        .iter()
        .find(|(upper, _)| fraction < *upper)
        .map_or(MoonPhase::New, |(_, phase)| *phase)
}

/// Lit fraction of the disc: `1 - 2 * |fraction - 0.5|`, clamped to `[0, 1]`.
pub fn illumination(fraction: f64) -> f64 {
    (1.0 - 2.0 * (fraction - 0.5).abs()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn seconds(days: f64) -> i64 {
        (days * SECONDS_PER_DAY) as i64
    }

    #[test]
    fn reference_instant_is_new_moon() {
        let fraction = phase_fraction(REFERENCE_NEW_MOON);
        assert!(fraction.abs() < 1e-12);
        assert_eq!(phase_for_fraction(fraction), MoonPhase::New);
        assert!(illumination(fraction).abs() < 1e-12);
    }

    #[test]
    fn half_a_month_later_is_full() {
        let ts = REFERENCE_NEW_MOON + seconds(SYNODIC_MONTH_DAYS / 2.0);
        let fraction = phase_fraction(ts);
        assert!((fraction - 0.5).abs() < 1e-6);
        assert_eq!(phase_for_fraction(fraction), MoonPhase::Full);
        assert!(illumination(fraction) > 0.999);
    }

    #[test]
    fn phase_wraps_every_synodic_month() {
        let start = REFERENCE_NEW_MOON + seconds(3.0);
        let next = start + seconds(SYNODIC_MONTH_DAYS);
        assert!((phase_fraction(start) - phase_fraction(next)).abs() < 1e-6);
    }

    #[test]
    fn pre_epoch_fraction_stays_in_range() {
        for ts in [i64::MIN, -1, 0, 1, REFERENCE_NEW_MOON - 1, i64::MAX] {
            let fraction = phase_fraction(ts);
            assert!((0.0..1.0).contains(&fraction), "fraction {fraction} for {ts}");
        }
    }

    #[test]
    fn one_second_before_reference_is_still_new() {
        assert_eq!(
            phase_for_fraction(phase_fraction(REFERENCE_NEW_MOON - 1)),
            MoonPhase::New
        );
    }

    #[test]
    fn window_boundaries() {
        assert_eq!(phase_for_fraction(0.0), MoonPhase::New);
        assert_eq!(phase_for_fraction(0.062_499), MoonPhase::New);
        assert_eq!(phase_for_fraction(0.0625), MoonPhase::WaxingCrescent);
        assert_eq!(phase_for_fraction(0.25), MoonPhase::FirstQuarter);
        assert_eq!(phase_for_fraction(0.4375), MoonPhase::Full);
        assert_eq!(phase_for_fraction(0.5625), MoonPhase::WaningGibbous);
        assert_eq!(phase_for_fraction(0.75), MoonPhase::LastQuarter);
        assert_eq!(phase_for_fraction(0.9), MoonPhase::WaningCrescent);
        assert_eq!(phase_for_fraction(0.9375), MoonPhase::New);
        assert_eq!(phase_for_fraction(0.999), MoonPhase::New);
    }

    #[test]
    fn illumination_is_bounded() {
        for step in 0_u32..=1000 {
            let fraction = f64::from(step) / 1000.0;
            let lit = illumination(fraction);
            assert!((0.0..=1.0).contains(&lit));
        }
    }
}
