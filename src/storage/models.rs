//! Data models for the storage layer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{stats::StatRow, GameId, PlayerId, Role};

/// Roster entry. Removal only clears `active` so old stat rows keep their owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub sort_order: i64,
}

/// A saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub opponent: String,
    pub date: NaiveDate,
}

/// A stat row joined with its player's name, for game detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatLine {
    /// `None` when the player record no longer exists.
    pub player_name: Option<String>,
    pub row: StatRow,
}

/// A stat row joined with its game, for player profile views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerGameLine {
    pub opponent: String,
    pub date: NaiveDate,
    pub row: StatRow,
}
