//! Configuration loading and typed config structures for Bottle Blitz.
//!
//! The canonical configuration lives in `blitz-config.yaml` at the project
//! root. Every section and field is optional; anything left out falls back
//! to the tuning the game ships with, so an empty file is a valid config.
//!
//! Sections owned by lower crates (movement, pills, bots, arena zones) are
//! embedded directly so there is a single source of truth per tunable.

use std::path::Path;
use std::time::Duration;

use blitz_agents::{BotWeights, ZoneConfig};
use blitz_types::Position;
use blitz_world::{MovementConfig, PillConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV: &str = "BLITZ_SEED";

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

/// Top-level game configuration. Mirrors `blitz-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Run-level settings: seed, cadence, countdown, pool, win score.
    pub world: WorldSettings,
    /// Pool and home zone geometry.
    pub arena: ZoneConfig,
    /// Movement speeds.
    pub movement: MovementConfig,
    /// Power pill timing and placement.
    pub pills: PillConfig,
    /// Bot decision weights.
    pub bots: BotWeights,
    /// Tutorial staging and scripted thief tuning.
    pub tutorial: TutorialConfig,
    /// Log output settings for the engine binary.
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `BLITZ_SEED` overrides `world.seed` when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Run-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Base random seed. Each run in a session derives its own from this.
    pub seed: u64,
    /// Simulation ticks per second.
    pub tick_rate_hz: u32,
    /// Seconds of pre-match countdown (0 disables it).
    pub countdown_seconds: u32,
    /// Bottles in the center at the start of a match.
    pub initial_pool: u32,
    /// Score that wins a match.
    pub win_score: u32,
    /// Stop the runner after this many frames (0 = unlimited).
    pub max_ticks: u64,
    /// Pace frames against the wall clock. When off, the runner
    /// fast-forwards, still feeding each frame the nominal delta.
    pub realtime: bool,
}

impl WorldSettings {
    /// Apply `BLITZ_SEED` when it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV) {
            match val.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(_) => warn!(value = %val, "Ignoring non-numeric {SEED_ENV}"),
            }
        }
    }

    /// Nominal time per frame.
    pub fn frame_delta(&self) -> Duration {
        Duration::from_secs(1)
            .checked_div(self.tick_rate_hz.max(1))
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: 60,
            countdown_seconds: 3,
            initial_pool: 5,
            win_score: 3,
            max_ticks: 0,
            realtime: true,
        }
    }
}

/// Tutorial staging and scripted thief tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    /// Bottles in the center at the start of the tutorial.
    pub initial_pool: u32,
    /// Bot Alpha's starting score, so there is something to snatch.
    pub rival_head_start: u32,
    /// Win threshold during the tutorial. High enough to never trigger.
    pub win_score: u32,
    /// First waypoint the player walks to.
    pub waypoint: Position,
    /// How close (strictly) the player must get to the waypoint.
    pub waypoint_radius: f64,
    /// Where the staged SPEED pill appears.
    pub speed_pill_at: Position,
    /// Where the staged PROTECT pill appears.
    pub protect_pill_at: Position,
    /// Thief approach speed, as a multiple of base speed.
    pub thief_speed_factor: f64,
    /// Extra distance past the zone radius at which the thief is repelled.
    pub bounce_margin: f64,
    /// How far past the zone radius the thief is thrown.
    pub bounce_distance: f64,
    /// Thief retreat speed, as a multiple of base speed.
    pub bounce_speed_factor: f64,
    /// Ticks between the first bounce and the end of the lesson.
    pub completion_delay_ticks: u64,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            initial_pool: 2,
            rival_head_start: 1,
            win_score: 99,
            waypoint: Position::new(30.0, 65.0),
            waypoint_radius: 5.0,
            speed_pill_at: Position::new(80.0, 75.0),
            protect_pill_at: Position::new(20.0, 75.0),
            thief_speed_factor: 2.5,
            bounce_margin: 3.0,
            bounce_distance: 25.0,
            bounce_speed_factor: 6.0,
            completion_delay_ticks: 60,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}
