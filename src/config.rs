use std::path::Path;

use log::LevelFilter;

use crate::error::ConfigError;
use crate::game::Piece;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 4;

/// Who drops the first piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstMove {
    Random,
    Human,
    Ai,
}

impl FirstMove {
    /// Resolve to a concrete piece, flipping a coin for `Random`.
    pub fn resolve<R: rand::Rng + ?Sized>(self, rng: &mut R) -> Piece {
        match self {
            FirstMove::Human => Piece::Player,
            FirstMove::Ai => Piece::Ai,
            FirstMove::Random => {
                if rng.random_bool(0.5) {
                    Piece::Player
                } else {
                    Piece::Ai
                }
            }
        }
    }
}

/// Game setup.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_name: String,
    /// 1 (easiest) to 4; the computer searches `difficulty + 1` plies.
    pub difficulty: u8,
    pub first_move: FirstMove,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_name: "Player".to_string(),
            difficulty: 3,
            first_move: FirstMove::Random,
        }
    }
}

impl GameConfig {
    /// Search depth for the configured difficulty.
    pub fn search_depth(&self) -> Result<usize, ConfigError> {
        difficulty_to_depth(self.difficulty)
    }
}

/// Map a 1-4 difficulty to a search depth.
pub fn difficulty_to_depth(difficulty: u8) -> Result<usize, ConfigError> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(ConfigError::InvalidDifficulty(difficulty));
    }
    Ok(difficulty as usize + 1)
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level.parse().map_err(|_| {
            ConfigError::Validation(format!("logging.level '{}' is not a log level", self.level))
        })
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.player_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "game.player_name must not be empty".into(),
            ));
        }
        self.game.search_depth()?;
        self.logging.level_filter()?;
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
