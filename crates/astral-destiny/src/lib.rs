//! The destiny engine: which triggers fire under a given sky.
//!
//! This crate holds everything that decides, given a
//! [`CelestialSnapshot`], whether a trigger fires and how urgent a soul
//! is. It performs no I/O and owns no clock; the tick scheduler in
//! `astral-core` drives it.
//!
//! # Modules
//!
//! - [`condition`] -- Conjunction-of-present-clauses condition matcher.
//! - [`error`] -- [`DestinyError`].
//! - [`priority`] -- Astral priority scoring.
//! - [`registry`] -- Capacity-bounded, insertion-ordered trigger registry.
//!
//! [`CelestialSnapshot`]: astral_types::CelestialSnapshot

pub mod condition;
pub mod error;
pub mod priority;
pub mod registry;

pub use condition::{Clause, Condition, evaluate};
pub use error::DestinyError;
pub use priority::score;
pub use registry::{MAX_TRIGGERS, TriggerRegistry};
