//! Configuration loading and typed config structures for the astral core.
//!
//! The configuration lives in `astral-config.yaml`. Every field has a
//! default, so an empty (or missing) file yields a working setup that
//! seeds the three classic demo triggers and runs 60 cycles.

use std::path::Path;

use astral_ephemeris::EphemerisMode;
use astral_types::ExecutionMode;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AstralConfig {
    /// Ephemeris mode and calendar policy.
    #[serde(default)]
    pub ephemeris: EphemerisConfig,

    /// Tick loop timing and bounds.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Triggers registered at startup, in order.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<TriggerSeed>,
}

impl AstralConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the tick loop:
    /// - `ASTRAL_TICK_INTERVAL_MS` overrides `scheduler.tick_interval_ms`
    /// - `ASTRAL_MAX_TICKS` overrides `scheduler.max_ticks`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default_with_triggers()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.scheduler.apply_env_overrides();
        Ok(config)
    }

    /// Defaults including the demo triggers.
    ///
    /// `Default::default()` leaves `triggers` empty; serde fills it from
    /// [`default_triggers`] only when a document omits the key.
    pub fn default_with_triggers() -> Self {
        Self {
            triggers: default_triggers(),
            ..Self::default()
        }
    }
}

/// Ephemeris configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EphemerisConfig {
    /// Data source mode.
    #[serde(default)]
    pub mode: EphemerisMode,

    /// Calendar offset from UTC in seconds, used for `numerology_day`.
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

/// Tick loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// Real-time milliseconds between cycles.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Cycles to run before stopping (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Start of simulated time. When set, the loop reads a stepping manual
    /// clock instead of the wall clock.
    #[serde(default)]
    pub simulated_start: Option<i64>,

    /// Simulated seconds per cycle when `simulated_start` is set.
    #[serde(default = "default_simulated_step_seconds")]
    pub simulated_step_seconds: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
            simulated_start: None,
            simulated_step_seconds: default_simulated_step_seconds(),
        }
    }
}

impl SchedulerConfig {
    /// Apply environment variable overrides. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(val) = env_u64("ASTRAL_TICK_INTERVAL_MS") {
            self.tick_interval_ms = val;
        }
        if let Some(val) = env_u64("ASTRAL_MAX_TICKS") {
            self.max_ticks = val;
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Text,
        }
    }
}

/// A trigger registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriggerSeed {
    /// Unique trigger name.
    pub name: String,
    /// Condition text.
    pub condition: String,
    /// Handler to invoke when the trigger fires.
    pub action_target: String,
    /// Advisory execution policy.
    #[serde(default)]
    pub mode: ExecutionMode,
}

const fn default_tick_interval_ms() -> u64 {
    5_000
}

const fn default_max_ticks() -> u64 {
    60
}

const fn default_simulated_step_seconds() -> i64 {
    86_400
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_triggers() -> Vec<TriggerSeed> {
    vec![
        TriggerSeed {
            name: "full_moon_ritual".to_owned(),
            condition: "moon == \"Full\"".to_owned(),
            action_target: "/usr/bin/full_moon_handler".to_owned(),
            mode: ExecutionMode::Native,
        },
        TriggerSeed {
            name: "new_moon_ritual".to_owned(),
            condition: "moon == \"New\"".to_owned(),
            action_target: "/usr/bin/new_moon_handler".to_owned(),
            mode: ExecutionMode::Native,
        },
        TriggerSeed {
            name: "lucky_seven".to_owned(),
            condition: "numerology_day == 7".to_owned(),
            action_target: "/usr/bin/lucky_day_handler".to_owned(),
            mode: ExecutionMode::Native,
        },
    ]
}
