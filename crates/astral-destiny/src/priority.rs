//! Astral priority scoring.
//!
//! `score = base + phase weight + floor(illumination * 5) + numerology bonus`.
//! The result is deliberately unclamped: with illumination in `[0, 1]` the
//! astral part adds between 1 and 18 to the base, and callers must not
//! assume any narrower range.

use astral_types::{CelestialSnapshot, MoonPhase};

/// Bonus for days that are a multiple of seven.
const NUMEROLOGY_BONUS: i64 = 3;

/// Multiplier applied to illumination before flooring.
const ILLUMINATION_SCALE: f64 = 5.0;

/// Contribution of the moon phase.
pub const fn phase_weight(phase: MoonPhase) -> i64 {
    match phase {
        MoonPhase::Full => 10,
        MoonPhase::New => 5,
        MoonPhase::FirstQuarter | MoonPhase::LastQuarter => 3,
        MoonPhase::WaxingCrescent
        | MoonPhase::WaxingGibbous
        | MoonPhase::WaningGibbous
        | MoonPhase::WaningCrescent => 1,
    }
}

/// Contribution of the lit fraction: `floor(illumination * 5)`.
#[allow(clippy::cast_possible_truncation)]
pub fn illumination_weight(illumination: f64) -> i64 {
    (illumination * ILLUMINATION_SCALE).floor() as i64
}

/// Contribution of the calendar day.
pub const fn numerology_weight(day: u8) -> i64 {
    match day {
        7 | 14 | 21 | 28 => NUMEROLOGY_BONUS,
        _ => 0,
    }
}

/// Astral priority of something with `base` priority under `snapshot`.
pub fn score(base: i64, snapshot: &CelestialSnapshot) -> i64 {
    base.saturating_add(phase_weight(snapshot.moon_phase))
        .saturating_add(illumination_weight(snapshot.moon_illumination))
        .saturating_add(numerology_weight(snapshot.numerology_day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(phase: MoonPhase, illumination: f64, day: u8) -> CelestialSnapshot {
        CelestialSnapshot {
            timestamp: 0,
            moon_phase: phase,
            moon_illumination: illumination,
            numerology_day: day,
            planets: Vec::new(),
        }
    }

    #[test]
    fn full_moon_on_the_seventh() {
        assert_eq!(score(0, &snapshot(MoonPhase::Full, 0.9, 7)), 17);
    }

    #[test]
    fn base_is_added() {
        assert_eq!(score(100, &snapshot(MoonPhase::New, 0.0, 1)), 105);
        assert_eq!(score(-20, &snapshot(MoonPhase::WaxingCrescent, 0.3, 2)), -18);
    }

    #[test]
    fn phase_weights() {
        assert_eq!(phase_weight(MoonPhase::Full), 10);
        assert_eq!(phase_weight(MoonPhase::New), 5);
        assert_eq!(phase_weight(MoonPhase::FirstQuarter), 3);
        assert_eq!(phase_weight(MoonPhase::LastQuarter), 3);
        assert_eq!(phase_weight(MoonPhase::WaningGibbous), 1);
    }

    #[test]
    fn illumination_floors() {
        assert_eq!(illumination_weight(0.0), 0);
        assert_eq!(illumination_weight(0.19), 0);
        assert_eq!(illumination_weight(0.2), 1);
        assert_eq!(illumination_weight(0.9), 4);
        assert_eq!(illumination_weight(1.0), 5);
    }

    #[test]
    fn numerology_bonus_on_multiples_of_seven() {
        for day in [7, 14, 21, 28] {
            assert_eq!(numerology_weight(day), 3);
        }
        for day in [1, 6, 8, 13, 30, 31] {
            assert_eq!(numerology_weight(day), 0);
        }
    }

    #[test]
    fn maximum_astral_contribution() {
        assert_eq!(score(0, &snapshot(MoonPhase::Full, 1.0, 28)), 18);
    }
}
