//! Identifier types.
//!
//! Souls are numbered monotonically from 1 within a run. Slot 0 is never
//! handed out, so `SoulId(0)` always means "no soul".

use serde::{Deserialize, Serialize};

/// Identifier of a soul in the lifecycle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SoulId(pub u32);

impl SoulId {
    /// Return the raw numeric id.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for SoulId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SoulId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<SoulId> for u32 {
    fn from(id: SoulId) -> Self {
        id.0
    }
}
