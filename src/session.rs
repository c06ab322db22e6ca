//! Live game recording.
//!
//! A game moves Idle → Recording → Saving and back to Idle once the save
//! succeeds. A failed save returns to Recording with every counter intact.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, StatsError},
    stats::empty_counters,
    storage::Player,
    PlayerId, Role,
};

/// Whether a tap adds or removes one from a counter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum TapMode {
    #[default]
    Plus,
    Minus,
}

/// One roster player's counters in the game being recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub role: Role,
    pub counts: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveGame {
    pub opponent: String,
    pub date: NaiveDate,
    pub entries: Vec<LiveEntry>,
}

impl LiveGame {
    pub fn entry(&self, player_id: PlayerId) -> Option<&LiveEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    pub fn count(&self, player_id: PlayerId, key: &str) -> u32 {
        self.entry(player_id)
            .and_then(|e| e.counts.get(key).copied())
            .unwrap_or(0)
    }

    /// Roster entries of one role, in roster order.
    pub fn entries_for(&self, role: Role) -> impl Iterator<Item = &LiveEntry> {
        self.entries.iter().filter(move |e| e.role == role)
    }

    fn tap(&mut self, player_id: PlayerId, key: &str, mode: TapMode) -> Result<u32> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.player_id == player_id)
            .ok_or_else(|| StatsError::PlayerNotFound {
                id: player_id.to_string(),
            })?;

        let count = entry
            .counts
            .get_mut(key)
            .ok_or_else(|| StatsError::UnknownCounter {
                key: key.to_string(),
            })?;

        *count = match mode {
            TapMode::Plus => count.saturating_add(1),
            TapMode::Minus => count.saturating_sub(1),
        };
        Ok(*count)
    }

    fn to_new_game(&self) -> NewGame {
        NewGame {
            opponent: self.opponent.clone(),
            date: self.date,
            rows: self
                .entries
                .iter()
                .map(|e| NewStatRow {
                    player_id: e.player_id,
                    role: e.role,
                    counts: e.counts.clone(),
                })
                .collect(),
        }
    }
}

/// Everything written when a game is saved: the header and one row per
/// roster player, all-zero rows included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub opponent: String,
    pub date: NaiveDate,
    pub rows: Vec<NewStatRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStatRow {
    pub player_id: PlayerId,
    pub role: Role,
    pub counts: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Recording(LiveGame),
    Saving(LiveGame),
}

impl SessionState {
    /// Resume recording a previously stored game.
    pub fn recording(game: LiveGame) -> Self {
        SessionState::Recording(game)
    }

    pub fn live_game(&self) -> Option<&LiveGame> {
        match self {
            SessionState::Idle => None,
            SessionState::Recording(game) | SessionState::Saving(game) => Some(game),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// Start a game against `opponent` with every active roster player at zero.
    pub fn start(&mut self, opponent: &str, date: NaiveDate, roster: &[Player]) -> Result<()> {
        if let Some(game) = self.live_game() {
            return Err(StatsError::GameInProgress {
                opponent: game.opponent.clone(),
            });
        }

        let opponent = opponent.trim();
        if opponent.is_empty() {
            return Err(StatsError::EmptyOpponent);
        }

        let entries = roster
            .iter()
            .filter(|p| p.active)
            .map(|p| LiveEntry {
                player_id: p.id,
                name: p.name.clone(),
                role: p.role,
                counts: empty_counters(p.role),
            })
            .collect();

        *self = SessionState::Recording(LiveGame {
            opponent: opponent.to_string(),
            date,
            entries,
        });
        Ok(())
    }

    /// Apply one tap and return the counter's new value.
    pub fn tap(&mut self, player_id: PlayerId, key: &str, mode: TapMode) -> Result<u32> {
        match self {
            SessionState::Recording(game) => game.tap(player_id, key, mode),
            SessionState::Saving(_) => Err(StatsError::SaveInProgress),
            SessionState::Idle => Err(StatsError::NoActiveGame),
        }
    }

    /// Move to Saving and hand out the rows to persist.
    pub fn begin_save(&mut self) -> Result<NewGame> {
        match std::mem::take(self) {
            SessionState::Recording(game) => {
                let new_game = game.to_new_game();
                *self = SessionState::Saving(game);
                Ok(new_game)
            }
            SessionState::Saving(game) => {
                *self = SessionState::Saving(game);
                Err(StatsError::SaveInProgress)
            }
            SessionState::Idle => Err(StatsError::NoActiveGame),
        }
    }

    /// Settle a save: success resets to Idle, failure resumes recording.
    pub fn finish_save<T, E>(&mut self, outcome: std::result::Result<T, E>) -> std::result::Result<T, E> {
        if let SessionState::Saving(game) = std::mem::take(self) {
            if outcome.is_err() {
                *self = SessionState::Recording(game);
            }
        }
        outcome
    }

    pub fn discard(&mut self) {
        *self = SessionState::Idle;
    }
}
