//! Totals and per-game averages over stat rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::format_average;
use crate::{GameId, PlayerId};


/// One player's counters for one game.
///
/// Rows are written once when a game is saved and only disappear when the
/// whole game is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRow {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub counts: BTreeMap<String, u32>,
}

impl StatRow {
    pub fn new(player_id: PlayerId, game_id: GameId, counts: BTreeMap<String, u32>) -> Self {
        Self {
            player_id,
            game_id,
            counts,
        }
    }

    /// Value of a counter; absent keys read as zero.
    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Whether any of `keys` is non-zero in this row.
    pub fn has_stats(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.count(k) > 0)
    }
}

/// Totals, one-decimal averages and game count derived from stat rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub totals: BTreeMap<String, u32>,
    pub averages: BTreeMap<String, String>,
    pub games: u32,
}

impl Aggregate {
    pub fn total(&self, key: &str) -> u32 {
        self.totals.get(key).copied().unwrap_or(0)
    }

    pub fn average(&self, key: &str) -> Option<&str> {
        self.averages.get(key).map(String::as_str)
    }

    fn from_totals(totals: BTreeMap<String, u32>, games: u32) -> Self {
        let averages = totals
            .iter()
            .map(|(k, &t)| (k.clone(), format_average(i64::from(t), games)))
            .collect();
        Self {
            totals,
            averages,
            games,
        }
    }
}

/// Sum every key in `keys` over `rows` and average by the number of rows.
///
/// Keys in a row that are not listed are ignored; listed keys missing from
/// a row count as zero. A key listed twice is summed once.
pub fn aggregate(rows: &[StatRow], keys: &[&str]) -> Aggregate {
    let mut totals: BTreeMap<String, u32> = keys.iter().map(|k| (k.to_string(), 0)).collect();
    for row in rows {
        for (key, total) in totals.iter_mut() {
            *total += row.count(key);
        }
    }
    Aggregate::from_totals(totals, rows.len() as u32)
}

/// Group rows by player and aggregate each group.
pub fn aggregate_by_player(rows: &[StatRow], keys: &[&str]) -> BTreeMap<PlayerId, Aggregate> {
    let mut grouped: BTreeMap<PlayerId, Vec<StatRow>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.player_id).or_default().push(row.clone());
    }
    grouped
        .into_iter()
        .map(|(player_id, rows)| (player_id, aggregate(&rows, keys)))
        .collect()
}

/// Whole-team totals, averaged over the number of games the team played.
pub fn team_totals(
    per_player: &BTreeMap<PlayerId, Aggregate>,
    keys: &[&str],
    game_count: u32,
) -> Aggregate {
    let totals = keys
        .iter()
        .map(|k| {
            let sum = per_player.values().map(|agg| agg.total(k)).sum::<u32>();
            (k.to_string(), sum)
        })
        .collect();
    Aggregate::from_totals(totals, game_count)
}
