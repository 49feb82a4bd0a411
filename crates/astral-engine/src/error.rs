//! Error types for the astral engine binary.

/// Top-level error for the astral engine.
///
/// Each variant wraps a subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: astral_core::config::ConfigError,
    },

    /// The context could not be built from configuration.
    #[error("context error: {source}")]
    Context {
        /// The underlying context error.
        #[from]
        source: astral_core::context::ContextError,
    },

    /// The tick loop stopped on a fatal cycle error.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: astral_core::runner::RunnerError,
    },

    /// The configured log level could not be turned into a filter.
    #[error("invalid log level {level:?}: {message}")]
    Logging {
        /// The configured level string.
        level: String,
        /// Description of the parse failure.
        message: String,
    },
}
