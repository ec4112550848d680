//! Game error types

use runner_engine::config::ConfigError;

/// Errors raised while setting up a game session
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A setting holds a value the game cannot run with
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Two prefabs share a name
    #[error("Duplicate prefab name: {0}")]
    DuplicatePrefab(String),

    /// No prefab with this name exists
    #[error("Unknown prefab: {0}")]
    UnknownPrefab(String),
}

/// Result alias for game setup
pub type GameResult<T> = Result<T, GameError>;
