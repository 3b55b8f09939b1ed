//! Configuration loading and typed config structures for Gridcraft.
//!
//! The canonical configuration lives in `gridcraft-config.yaml` next to the
//! binary's working directory. Every field has a default, so a missing file
//! or an empty document yields the stock game: interaction radius 3, spawn
//! probability 0.2, win threshold 16, base token value 1.

use std::path::{Path, PathBuf};

use gridcraft_types::{CellId, TokenValue};
use gridcraft_world::{
    DEFAULT_CELL_SIZE_DEGREES, DEFAULT_MAX_VISIBLE_CELLS, DEFAULT_SPAWN_PROBABILITY, GridGeometry,
    SpawnRules, WorldError,
};
use serde::Deserialize;

use crate::interaction::InteractionRules;
use crate::storage::{SAVE_KEY, is_valid_key};

/// Environment variable overriding `storage.save_dir`.
pub const SAVE_DIR_ENV: &str = "GRIDCRAFT_SAVE_DIR";

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

    /// A value parsed but is not usable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A value was rejected by the world model.
    #[error("invalid world settings: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `gridcraft-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// World seed, grid size, and start position.
    #[serde(default)]
    pub world: WorldConfig,

    /// Interaction and spawn rules.
    #[serde(default)]
    pub rules: RulesConfig,

    /// View limits.
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Where saves go.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `GRIDCRAFT_SAVE_DIR` overrides `storage.save_dir` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.storage.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// An empty or whitespace-only document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first constraint violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spawn_rules()?;
        self.grid()?;

        if self.rules.base_token_value == 0 {
            return Err(ConfigError::Invalid {
                field: "rules.base_token_value",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.rules.win_threshold <= self.rules.base_token_value {
            return Err(ConfigError::Invalid {
                field: "rules.win_threshold",
                reason: format!(
                    "must exceed base_token_value ({})",
                    self.rules.base_token_value
                ),
            });
        }

        let view =
            gridcraft_world::CellRange::around(CellId::ORIGIN, self.viewport.neighborhood_radius);
        if view.cell_count() > self.viewport.max_visible_cells {
            return Err(ConfigError::Invalid {
                field: "viewport.neighborhood_radius",
                reason: format!(
                    "a radius of {} covers {} cells, above max_visible_cells ({})",
                    self.viewport.neighborhood_radius,
                    view.cell_count(),
                    self.viewport.max_visible_cells
                ),
            });
        }

        if !is_valid_key(&self.storage.save_key) {
            return Err(ConfigError::Invalid {
                field: "storage.save_key",
                reason: "use only ASCII letters, digits, '.', '_' and '-'".to_owned(),
            });
        }
        Ok(())
    }

    /// Spawn rules derived from `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::World`] if the spawn probability is out of range.
    pub fn spawn_rules(&self) -> Result<SpawnRules, ConfigError> {
        Ok(SpawnRules::new(
            self.rules.spawn_probability,
            TokenValue(self.rules.base_token_value),
        )?)
    }

    /// Grid geometry derived from `world`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::World`] if the cell size is not usable.
    pub fn grid(&self) -> Result<GridGeometry, ConfigError> {
        Ok(GridGeometry::new(self.world.cell_size_degrees)?)
    }

    /// Interaction rules derived from `rules`.
    pub const fn interaction_rules(&self) -> InteractionRules {
        InteractionRules {
            interaction_radius: self.rules.interaction_radius,
            win_threshold: TokenValue(self.rules.win_threshold),
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Seed folded into every spawn decision.
    #[serde(default)]
    pub seed: u64,

    /// Edge length of one grid cell, in degrees.
    #[serde(default = "default_cell_size_degrees")]
    pub cell_size_degrees: f64,

    /// Cell a fresh player starts on.
    #[serde(default)]
    pub start: CellId,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cell_size_degrees: default_cell_size_degrees(),
            start: CellId::ORIGIN,
        }
    }
}

/// Gameplay rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RulesConfig {
    /// Maximum Chebyshev distance at which cells can be clicked.
    #[serde(default = "default_interaction_radius")]
    pub interaction_radius: u32,

    /// Probability that an untouched cell holds a token.
    #[serde(default = "default_spawn_probability")]
    pub spawn_probability: f64,

    /// Crafting a token of at least this value wins the game.
    #[serde(default = "default_win_threshold")]
    pub win_threshold: u64,

    /// Value of a spawned token.
    #[serde(default = "default_base_token_value")]
    pub base_token_value: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            interaction_radius: default_interaction_radius(),
            spawn_probability: default_spawn_probability(),
            win_threshold: default_win_threshold(),
            base_token_value: default_base_token_value(),
        }
    }
}

/// View configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewportConfig {
    /// Radius of the square drawn around the player.
    #[serde(default = "default_neighborhood_radius")]
    pub neighborhood_radius: u32,

    /// Largest number of cells a single view may cover.
    #[serde(default = "default_max_visible_cells")]
    pub max_visible_cells: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            neighborhood_radius: default_neighborhood_radius(),
            max_visible_cells: default_max_visible_cells(),
        }
    }
}

/// Save location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding save files.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Key the save blob is stored under.
    #[serde(default = "default_save_key")]
    pub save_key: String,
}

impl StorageConfig {
    /// Override the save directory with `GRIDCRAFT_SAVE_DIR` when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(SAVE_DIR_ENV) {
            self.save_dir = PathBuf::from(val);
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            save_key: default_save_key(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_cell_size_degrees() -> f64 {
    DEFAULT_CELL_SIZE_DEGREES
}

const fn default_interaction_radius() -> u32 {
    3
}

const fn default_spawn_probability() -> f64 {
    DEFAULT_SPAWN_PROBABILITY
}

const fn default_win_threshold() -> u64 {
    16
}

const fn default_base_token_value() -> u64 {
    1
}

const fn default_neighborhood_radius() -> u32 {
    8
}

const fn default_max_visible_cells() -> u64 {
    DEFAULT_MAX_VISIBLE_CELLS
}

fn default_save_dir() -> PathBuf {
    PathBuf::from(".gridcraft")
}

fn default_save_key() -> String {
    SAVE_KEY.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
