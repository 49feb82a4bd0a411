//! Clock sources for the tick scheduler.
//!
//! The scheduler asks a [`ClockSource`] for "now" once per cycle. The
//! wall clock never fails; [`ManualClock`] lets simulations and tests step
//! through time deterministically. Sources that can fail (an RTC that has
//! not been read yet, a remote time service) report
//! [`ClockError::Unavailable`], which aborts the cycle.

use chrono::Utc;

/// Errors reported by a clock source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The source cannot currently produce an instant.
    #[error("clock unavailable: {reason}")]
    Unavailable {
        /// Why the source could not produce an instant.
        reason: String,
    },
}

/// A source of the current instant, in seconds since the Unix epoch.
pub trait ClockSource: Send {
    /// The current instant.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Unavailable`] if no instant can be produced.
    fn now(&mut self) -> Result<i64, ClockError>;
}

/// The system wall clock (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&mut self) -> Result<i64, ClockError> {
        Ok(Utc::now().timestamp())
    }
}

/// A clock that reports a set instant and then advances by a fixed step.
///
/// With a step of 0 it always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    current: i64,
    step_seconds: i64,
}

impl ManualClock {
    /// A clock frozen at `timestamp`.
    pub const fn fixed(timestamp: i64) -> Self {
        Self {
            current: timestamp,
            step_seconds: 0,
        }
    }

    /// A clock that starts at `start` and moves `step_seconds` per reading.
    pub const fn stepping(start: i64, step_seconds: i64) -> Self {
        Self {
            current: start,
            step_seconds,
        }
    }

    /// Jump to `timestamp`. The next reading returns it.
    pub const fn set(&mut self, timestamp: i64) {
        self.current = timestamp;
    }

    /// The instant the next reading will return.
    pub const fn peek(&self) -> i64 {
        self.current
    }
}

impl ClockSource for ManualClock {
    fn now(&mut self) -> Result<i64, ClockError> {
        let reading = self.current;
        self.current = self.current.saturating_add(self.step_seconds);
        Ok(reading)
    }
}
