//! Enumeration types for the astral core.
//!
//! Moon phases and zodiac signs are the vocabulary of trigger conditions,
//! so each carries both a condition-language name (`"Full"`, `"Scorpio"`)
//! and, where it differs, a human display name (`"Full Moon"`).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lunar phases
// ---------------------------------------------------------------------------

/// One of the eight named lunar phases.
///
/// Variants are declared in cycle order starting from the new moon, so
/// [`MoonPhase::index`] is also the phase's position in the lunation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    /// Dark moon at the start of the cycle.
    New,
    /// Thin lit sliver, growing.
    WaxingCrescent,
    /// Half lit, growing.
    FirstQuarter,
    /// More than half lit, growing.
    WaxingGibbous,
    /// Fully lit.
    Full,
    /// More than half lit, shrinking.
    WaningGibbous,
    /// Half lit, shrinking.
    LastQuarter,
    /// Thin lit sliver, shrinking.
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in cycle order.
    pub const ALL: [Self; 8] = [
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::Full,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Position of this phase within the cycle (0 = New, 4 = Full).
    pub const fn index(self) -> u8 {
        match self {
            Self::New => 0,
            Self::WaxingCrescent => 1,
            Self::FirstQuarter => 2,
            Self::WaxingGibbous => 3,
            Self::Full => 4,
            Self::WaningGibbous => 5,
            Self::LastQuarter => 6,
            Self::WaningCrescent => 7,
        }
    }

    /// Coarse phase value in `[0, 1)`: `index / 8`.
    ///
    /// This is the eight-step quantization exported to userland, not the
    /// continuous phase fraction the ephemeris computes internally.
    pub fn fraction(self) -> f64 {
        f64::from(self.index()) / 8.0
    }

    /// Name used for this phase inside trigger conditions.
    pub const fn condition_name(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::WaxingCrescent => "WaxingCrescent",
            Self::FirstQuarter => "FirstQuarter",
            Self::WaxingGibbous => "WaxingGibbous",
            Self::Full => "Full",
            Self::WaningGibbous => "WaningGibbous",
            Self::LastQuarter => "LastQuarter",
            Self::WaningCrescent => "WaningCrescent",
        }
    }

    /// Human-readable name for logs and status displays.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Look up a phase by its condition name (case-sensitive).
    pub fn from_condition_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.condition_name() == name)
    }
}

impl core::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Zodiac
// ---------------------------------------------------------------------------

/// One of the twelve 30-degree zodiac signs, starting at Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    /// 0-30 degrees.
    Aries,
    /// 30-60 degrees.
    Taurus,
    /// 60-90 degrees.
    Gemini,
    /// 90-120 degrees.
    Cancer,
    /// 120-150 degrees.
    Leo,
    /// 150-180 degrees.
    Virgo,
    /// 180-210 degrees.
    Libra,
    /// 210-240 degrees.
    Scorpio,
    /// 240-270 degrees.
    Sagittarius,
    /// 270-300 degrees.
    Capricorn,
    /// 300-330 degrees.
    Aquarius,
    /// 330-360 degrees.
    Pisces,
}

impl ZodiacSign {
    /// All signs in ecliptic order.
    pub const ALL: [Self; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// Sign at `index` in the table, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        let wrapped = index.checked_rem(Self::ALL.len()).unwrap_or(0);
        Self::ALL.get(wrapped).copied().unwrap_or(Self::Aries)
    }

    /// English name of the sign, as used in trigger conditions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }
}

impl core::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// A tracked celestial body. The ephemeris reports them in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    /// The Sun.
    Sun,
    /// The Moon.
    Moon,
    /// Mercury.
    Mercury,
    /// Venus.
    Venus,
    /// Mars.
    Mars,
    /// Jupiter.
    Jupiter,
    /// Saturn.
    Saturn,
    /// Uranus.
    Uranus,
    /// Neptune.
    Neptune,
    /// Pluto.
    Pluto,
}

impl Planet {
    /// All bodies in reporting order.
    pub const ALL: [Self; 10] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    /// English name of the body, as used in `planet["<Name>"]` clauses.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }
}

impl core::fmt::Display for Planet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Triggers and souls
// ---------------------------------------------------------------------------

/// Advisory execution policy attached to a trigger.
///
/// The core never enforces this; it is passed through to whatever
/// collaborator invokes the trigger's action target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Run the handler directly.
    #[default]
    Native,
    /// Run the handler in an isolated sandbox.
    Sandboxed,
    /// Only observe and report; never run the handler.
    ObserverOnly,
}

/// Lifecycle state of a soul (tracked process).
///
/// `Birth` is the initial state and `Death` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoulState {
    /// Freshly created, not yet scheduled.
    Birth,
    /// Currently running.
    Executing,
    /// Alive but waiting.
    Dormant,
    /// Departed. No transition leaves this state.
    Death,
}

impl SoulState {
    /// Whether this state is terminal.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Death)
    }
}

impl core::fmt::Display for SoulState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Birth => write!(f, "birth"),
            Self::Executing => write!(f, "executing"),
            Self::Dormant => write!(f, "dormant"),
            Self::Death => write!(f, "death"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_indices_follow_cycle_order() {
        for (expected, phase) in MoonPhase::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(phase.index()), expected);
        }
    }

    #[test]
    fn phase_condition_names_round_trip() {
        for phase in MoonPhase::ALL {
            assert_eq!(MoonPhase::from_condition_name(phase.condition_name()), Some(phase));
        }
        assert_eq!(MoonPhase::from_condition_name("full"), None);
        assert_eq!(MoonPhase::from_condition_name("Full Moon"), None);
    }

    #[test]
    fn full_moon_fraction_is_one_half() {
        assert!((MoonPhase::Full.fraction() - 0.5).abs() < f64::EPSILON);
        assert!(MoonPhase::New.fraction().abs() < f64::EPSILON);
    }

    #[test]
    fn zodiac_index_wraps() {
        assert_eq!(ZodiacSign::from_index(0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_index(7), ZodiacSign::Scorpio);
        assert_eq!(ZodiacSign::from_index(12), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_index(23), ZodiacSign::Pisces);
    }

    #[test]
    fn execution_mode_uses_snake_case() {
        let json = serde_json::to_string(&ExecutionMode::ObserverOnly).ok();
        assert_eq!(json.as_deref(), Some("\"observer_only\""));
    }

    #[test]
    fn only_death_is_terminal() {
        assert!(SoulState::Death.is_terminal());
        assert!(!SoulState::Birth.is_terminal());
        assert!(!SoulState::Dormant.is_terminal());
    }
}
