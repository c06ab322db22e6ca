//! Error types for the handball stats CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("Game not found: {id}")]
    GameNotFound { id: String },

    #[error("Unknown stat: {key}")]
    UnknownCounter { key: String },

    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Opponent must not be empty")]
    EmptyOpponent,

    #[error("Cannot change role of {name}: stats already recorded")]
    RoleLocked { name: String },

    #[error("Cannot change role of {name} while a game is being recorded")]
    RoleLockedDuringGame { name: String },

    #[error("PIN must be exactly 4 digits")]
    InvalidPin,

    #[error("PIN entries do not match")]
    PinMismatch,

    #[error("Wrong PIN")]
    WrongPin,

    #[error("A PIN is set; pass --pin or set {env_var}")]
    PinRequired { env_var: String },

    #[error("A PIN is already set; use `pin change`")]
    PinAlreadySet,

    #[error("No PIN has been set; use `pin setup`")]
    PinNotSet,

    #[error("No game in progress")]
    NoActiveGame,

    #[error("A game against {opponent} is already in progress")]
    GameInProgress { opponent: String },

    #[error("Game is already being saved")]
    SaveInProgress,

    #[error("Cannot compare a player with themselves")]
    SamePlayer,
}

impl From<anyhow::Error> for StatsError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StatsError>() {
            Ok(stats_err) => stats_err,
            Err(err) => StatsError::Storage {
                message: format!("{err:#}"),
            },
        }
    }
}
