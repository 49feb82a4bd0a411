//! Tick cycle, soul table, and orchestration for the SpiritOS astral core.
//!
//! This crate owns the process-wide state of the astral core and the
//! cycle that drives it. All of that state lives in an explicitly
//! constructed [`AstralContext`]; there are no globals. One cycle runs at a
//! time, and a cycle never suspends, so a caller that shares the context
//! between threads only needs to hold a single lock per cycle.
//!
//! # Modules
//!
//! - [`clock`] -- [`ClockSource`] trait with wall-clock and manual clocks.
//! - [`config`] -- Configuration loading from `astral-config.yaml`.
//! - [`context`] -- [`AstralContext`]: ephemeris, trigger registry, soul
//!   table.
//! - [`lifecycle`] -- [`SoulTable`]: soul lifecycle and the global tick.
//! - [`runner`] -- Bounded async loop around [`run_cycle`].
//! - [`scheduler`] -- [`run_cycle`], one evaluation cycle.
//!
//! [`ClockSource`]: clock::ClockSource
//! [`AstralContext`]: context::AstralContext
//! [`SoulTable`]: lifecycle::SoulTable
//! [`run_cycle`]: scheduler::run_cycle

pub mod clock;
pub mod config;
pub mod context;
pub mod lifecycle;
pub mod runner;
pub mod scheduler;
