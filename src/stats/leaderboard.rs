//! Per-counter leaderboards.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{aggregate::Aggregate, format::format_average};
use crate::{storage::Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub player: Player,
    pub total: u32,
    pub games: u32,
    pub average: String,
}

/// Players ranked by one counter, highest total first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub counter_key: String,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn leader(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Share of the leader's total, for proportional bars.
    pub fn bar_ratio(&self, entry: &LeaderboardEntry) -> Option<f64> {
        let leader = self.leader()?;
        Some(f64::from(entry.total) / f64::from(leader.total))
    }
}

/// Rank players by their total for `counter_key`.
///
/// Aggregates without a known player, or with a zero total, are left out.
/// Equal totals are ordered by player name, then id.
pub fn rank(
    per_player: &BTreeMap<PlayerId, Aggregate>,
    counter_key: &str,
    players: &HashMap<PlayerId, Player>,
) -> Leaderboard {
    let mut entries: Vec<LeaderboardEntry> = per_player
        .iter()
        .filter_map(|(player_id, agg)| {
            let player = players.get(player_id)?;
            let total = agg.total(counter_key);
            (total > 0).then(|| LeaderboardEntry {
                player: player.clone(),
                total,
                games: agg.games,
                average: format_average(i64::from(total), agg.games),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.player.name.cmp(&b.player.name))
            .then_with(|| a.player.id.cmp(&b.player.id))
    });

    Leaderboard {
        counter_key: counter_key.to_string(),
        entries,
    }
}
