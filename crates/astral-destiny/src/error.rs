//! Error types for the destiny engine.

/// Errors returned by trigger registry operations.
///
/// Every failing operation leaves the registry exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinyError {
    /// A trigger with this name is already registered.
    #[error("duplicate trigger name: {0}")]
    DuplicateName(String),

    /// No trigger with this name is registered.
    #[error("trigger not found: {0}")]
    NotFound(String),

    /// The registry already holds its maximum number of triggers.
    #[error("trigger registry full (capacity {capacity})")]
    CapacityExceeded {
        /// The registry capacity.
        capacity: usize,
    },

    /// A field exceeds its maximum length.
    #[error("{field} is {actual} characters, maximum is {max}")]
    InvalidRange {
        /// Which field was too long.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },
}
