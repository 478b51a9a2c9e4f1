use crate::consts;
use crate::highscore::{AnyStore, HighScoreFile, LoadError, MemoryStore};
use ratatui::layout::Size;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Parameters of the game itself
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized or are out of range.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        content.parse()
    }

    /// Open the high score store described by the configuration.
    ///
    /// If the high score file exists but cannot be read, an empty store for
    /// the same path is returned along with the error, so that the game can
    /// still be played (and new high scores saved) after warning the user.
    pub(crate) fn open_score_store(&self) -> (AnyStore, Option<LoadError>) {
        if !self.files.save_high_score {
            return (AnyStore::Memory(MemoryStore::default()), None);
        }
        let Some(path) = self
            .files
            .high_score_file
            .clone()
            .or_else(HighScoreFile::default_path)
        else {
            tracing::warn!("Could not determine high score file path; high score will not be saved");
            return (AnyStore::Memory(MemoryStore::default()), None);
        };
        match HighScoreFile::load(path.clone()) {
            Ok(store) => (AnyStore::File(store), None),
            Err(e) => (AnyStore::File(HighScoreFile::empty(path)), Some(e)),
        }
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Config, ConfigError> {
        let config = toml::from_str::<Config>(s)?;
        config.game.validate()?;
        Ok(config)
    }
}

/// Size & pace of the game
#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Number of columns in the grid
    pub(crate) width: u16,

    /// Number of rows in the grid
    pub(crate) height: u16,

    /// Steps per second at the start of a session
    pub(crate) base_speed: f64,

    /// Factor by which the speed is multiplied whenever food is eaten
    pub(crate) speed_growth: f64,
}

impl GameConfig {
    pub(crate) fn grid_size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(consts::MIN_GRID_SIZE.width..=consts::MAX_GRID_SIZE.width).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(consts::MIN_GRID_SIZE.height..=consts::MAX_GRID_SIZE.height).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if !(consts::MIN_SPEED..=consts::MAX_BASE_SPEED).contains(&self.base_speed) {
            return Err(ConfigError::BaseSpeed(self.base_speed));
        }
        if !(1.0..=consts::MAX_SPEED_GROWTH).contains(&self.speed_growth) {
            return Err(ConfigError::SpeedGrowth(self.speed_growth));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            width: consts::GRID_SIZE.width,
            height: consts::GRID_SIZE.height,
            base_speed: consts::BASE_SPEED,
            speed_growth: consts::SPEED_GROWTH,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error(
        "grid width must be between {min} and {max}; got {0}",
        min = consts::MIN_GRID_SIZE.width,
        max = consts::MAX_GRID_SIZE.width
    )]
    Width(u16),
    #[error(
        "grid height must be between {min} and {max}; got {0}",
        min = consts::MIN_GRID_SIZE.height,
        max = consts::MAX_GRID_SIZE.height
    )]
    Height(u16),
    #[error(
        "base speed must be between {min} and {max}; got {0}",
        min = consts::MIN_SPEED,
        max = consts::MAX_BASE_SPEED
    )]
    BaseSpeed(f64),
    #[error(
        "speed growth must be between 1 and {max}; got {0}",
        max = consts::MAX_SPEED_GROWTH
    )]
    SpeedGrowth(f64),
}
