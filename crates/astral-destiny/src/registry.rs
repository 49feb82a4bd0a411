//! Trigger registry.
//!
//! Triggers are kept in insertion order in storage allocated once for
//! [`MAX_TRIGGERS`] entries. The registry never grows past that: an `add`
//! at capacity fails with [`DestinyError::CapacityExceeded`] and leaves the
//! table untouched.

use astral_types::{ExecutionMode, TriggerDefinition};
use tracing::info;

use crate::error::DestinyError;

/// Maximum number of registered triggers.
pub const MAX_TRIGGERS: usize = 128;

/// Maximum trigger name length in characters.
pub const MAX_NAME_LEN: usize = 63;

/// Maximum condition length in characters.
pub const MAX_CONDITION_LEN: usize = 255;

/// Maximum action target length in characters.
pub const MAX_ACTION_TARGET_LEN: usize = 255;

/// Insertion-ordered, capacity-bounded set of named triggers.
#[derive(Debug, Clone)]
pub struct TriggerRegistry {
    entries: Vec<TriggerDefinition>,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerRegistry {
    /// Create an empty registry with room for [`MAX_TRIGGERS`] entries.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_TRIGGERS),
        }
    }

    /// Register a new, active trigger.
    ///
    /// # Errors
    ///
    /// - [`DestinyError::InvalidRange`] if a field exceeds its length limit.
    /// - [`DestinyError::DuplicateName`] if `name` is already registered.
    /// - [`DestinyError::CapacityExceeded`] if the registry is full.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        condition: impl Into<String>,
        action_target: impl Into<String>,
        mode: ExecutionMode,
    ) -> Result<(), DestinyError> {
        let name = name.into();
        let condition = condition.into();
        let action_target = action_target.into();

        check_len("name", &name, MAX_NAME_LEN)?;
        check_len("condition", &condition, MAX_CONDITION_LEN)?;
        check_len("action_target", &action_target, MAX_ACTION_TARGET_LEN)?;

        if self.position(&name).is_some() {
            return Err(DestinyError::DuplicateName(name));
        }
        if self.entries.len() >= MAX_TRIGGERS {
            return Err(DestinyError::CapacityExceeded {
                capacity: MAX_TRIGGERS,
            });
        }

        info!(trigger = %name, condition = %condition, action_target = %action_target, "Trigger registered");
        self.entries.push(TriggerDefinition {
            name,
            condition,
            action_target,
            mode,
            active: true,
        });
        Ok(())
    }

    /// Remove a trigger, keeping the remaining entries in order.
    ///
    /// # Errors
    ///
    /// Returns [`DestinyError::NotFound`] if no trigger has this name.
    pub fn remove(&mut self, name: &str) -> Result<TriggerDefinition, DestinyError> {
        let index = self
            .position(name)
            .ok_or_else(|| DestinyError::NotFound(name.to_owned()))?;
        let removed = self.entries.remove(index);
        info!(trigger = %removed.name, "Trigger removed");
        Ok(removed)
    }

    /// Look up a trigger by name.
    pub fn get(&self, name: &str) -> Option<&TriggerDefinition> {
        self.entries.iter().find(|t| t.name == name)
    }

    /// Up to `limit` triggers in insertion order.
    pub fn list(&self, limit: usize) -> Vec<TriggerDefinition> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Activate or deactivate a trigger.
    ///
    /// # Errors
    ///
    /// Returns [`DestinyError::NotFound`] if no trigger has this name.
    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), DestinyError> {
        let trigger = self
            .entries
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| DestinyError::NotFound(name.to_owned()))?;
        trigger.active = active;
        info!(trigger = %name, active, "Trigger activation changed");
        Ok(())
    }

    /// All triggers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerDefinition> {
        self.entries.iter()
    }

    /// Active triggers in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &TriggerDefinition> {
        self.entries.iter().filter(|t| t.active)
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no triggers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of triggers this registry accepts.
    pub const fn capacity(&self) -> usize {
        MAX_TRIGGERS
    }

    /// Remove every trigger.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|t| t.name == name)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), DestinyError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(DestinyError::InvalidRange { field, max, actual });
    }
    Ok(())
}
