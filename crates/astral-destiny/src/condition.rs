//! Trigger condition matching.
//!
//! A condition is not a boolean expression. It is scanned for three clause
//! shapes, and it holds when every clause found holds:
//!
//! - `moon == "<Phase>"` where `<Phase>` is a [`MoonPhase`] condition name
//!   such as `New` or `Full`.
//! - `numerology_day == <N>` with `N` in `1..=31`.
//! - `planet["<Name>"].sign == "<Sign>"`.
//!
//! Everything else in the text is ignored, so a condition with no
//! recognizable clause holds for every snapshot. Operators such as `&&`,
//! `||` or `!` carry no meaning: `moon == "New" || moon == "Full"` is two
//! clauses that can never both hold.

use astral_types::{CelestialSnapshot, MoonPhase};

const MOON_PREFIX: &str = "moon == \"";
const DAY_PREFIX: &str = "numerology_day == ";
const PLANET_PREFIX: &str = "planet[\"";
const SIGN_INFIX: &str = "\"].sign == \"";

/// Highest day-of-month a `numerology_day` clause may name.
const MAX_DAY: u8 = 31;

/// A single recognized predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// The snapshot's moon phase equals this phase.
    Moon(MoonPhase),
    /// The snapshot's numerology day equals this day.
    NumerologyDay(u8),
    /// Some planet entry has this name and sign.
    PlanetSign {
        /// Body name as written in the condition.
        planet: String,
        /// Sign name as written in the condition.
        sign: String,
    },
}

impl Clause {
    /// Whether this clause holds for `snapshot`.
    pub fn holds(&self, snapshot: &CelestialSnapshot) -> bool {
        match self {
            Self::Moon(phase) => snapshot.moon_phase == *phase,
            Self::NumerologyDay(day) => snapshot.numerology_day == *day,
            Self::PlanetSign { planet, sign } => snapshot
                .planets
                .iter()
                .any(|p| p.name.name() == planet && p.sign.name() == sign),
        }
    }
}

/// The clauses recognized in a condition text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    /// Scan `text` for clauses.
    pub fn parse(text: &str) -> Self {
        let mut clauses = Vec::new();
        clauses.extend(moon_clauses(text));
        clauses.extend(day_clauses(text));
        clauses.extend(planet_clauses(text));
        Self { clauses }
    }

    /// Recognized clauses, grouped by kind in text order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether no clause was recognized (the condition always holds).
    pub fn is_vacuous(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether every clause holds for `snapshot`.
    pub fn evaluate(&self, snapshot: &CelestialSnapshot) -> bool {
        self.clauses.iter().all(|clause| clause.holds(snapshot))
    }
}

/// Evaluate condition text against a snapshot.
pub fn evaluate(condition: &str, snapshot: &CelestialSnapshot) -> bool {
    Condition::parse(condition).evaluate(snapshot)
}

/// Text following each occurrence of `prefix`, up to the next occurrence.
fn after_each<'a>(text: &'a str, prefix: &'a str) -> impl Iterator<Item = &'a str> {
    text.split(prefix).skip(1)
}

/// Contents of a string literal whose opening quote was already consumed.
fn quoted(rest: &str) -> Option<&str> {
    rest.split_once('"').map(|(inner, _)| inner)
}

fn moon_clauses(text: &str) -> impl Iterator<Item = Clause> + '_ {
    after_each(text, MOON_PREFIX)
        .filter_map(quoted)
        .filter_map(MoonPhase::from_condition_name)
        .map(Clause::Moon)
}

fn day_clauses(text: &str) -> impl Iterator<Item = Clause> + '_ {
    after_each(text, DAY_PREFIX).filter_map(|rest| {
        // Leading digit run only: `== 17` is day 17, never day 1.
        // A zero-padded literal such as `07` names no day.
        let digits = rest.split(|c: char| !c.is_ascii_digit()).next()?;
        if digits.starts_with('0') {
            return None;
        }
        let day: u8 = digits.parse().ok()?;
        (1..=MAX_DAY).contains(&day).then_some(Clause::NumerologyDay(day))
    })
}

fn planet_clauses(text: &str) -> impl Iterator<Item = Clause> + '_ {
    after_each(text, PLANET_PREFIX).filter_map(|rest| {
        let (planet, tail) = rest.split_once(SIGN_INFIX)?;
        if planet.contains('"') {
            return None;
        }
        let sign = quoted(tail)?;
        Some(Clause::PlanetSign {
            planet: planet.to_owned(),
            sign: sign.to_owned(),
        })
    })
}
