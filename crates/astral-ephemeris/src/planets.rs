//! Simulated planetary positions.
//!
//! Each body moves uniformly around the ecliptic with a fixed orbital
//! period, starting at 0 degrees at the Unix epoch.

use astral_types::{Planet, PlanetPosition, ZodiacSign};

use crate::lunar::days_since;

/// Width of one zodiac sign in degrees.
const DEGREES_PER_SIGN: f64 = 30.0;

/// Orbital (or apparent) period of `planet` in days.
pub const fn orbital_period_days(planet: Planet) -> f64 {
    match planet {
        Planet::Sun => 365.25,
        Planet::Moon => 27.32,
        Planet::Mercury => 87.97,
        Planet::Venus => 224.70,
        Planet::Mars => 686.98,
        Planet::Jupiter => 4_332.59,
        Planet::Saturn => 10_759.22,
        Planet::Uranus => 30_688.5,
        Planet::Neptune => 60_182.0,
        Planet::Pluto => 90_560.0,
    }
}

/// Ecliptic longitude of `planet` at `timestamp`, in `[0, 360)`.
pub fn degree_at(planet: Planet, timestamp: i64) -> f64 {
    let orbits = days_since(0, timestamp) / orbital_period_days(planet);
    let degree = orbits.rem_euclid(1.0) * 360.0;
    if degree >= 360.0 { 0.0 } else { degree }
}

/// Zodiac sign containing `degree`: `floor(degree / 30) mod 12`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sign_for_degree(degree: f64) -> ZodiacSign {
    // Negative or NaN inputs saturate to 0 in the cast.
    let index = (degree / DEGREES_PER_SIGN).floor() as usize;
    ZodiacSign::from_index(index)
}

/// Position record for `planet` at `timestamp`.
pub fn position_at(planet: Planet, timestamp: i64) -> PlanetPosition {
    let degree = degree_at(planet, timestamp);
    PlanetPosition {
        name: planet,
        sign: sign_for_degree(degree),
        degree,
    }
}

/// Positions of all ten bodies, in [`Planet::ALL`] order.
pub fn positions_at(timestamp: i64) -> Vec<PlanetPosition> {
    Planet::ALL
        .into_iter()
        .map(|planet| position_at(planet, timestamp))
        .collect()
}
