//! Basic database query operations

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row, Transaction};
use tracing::{debug, info};

use super::{
    models::*,
    schema::{stats_table, TeamDatabase},
};
use crate::{error::StatsError, session::NewGame, stats::StatRow, GameId, PlayerId, Role};

const PLAYER_COLUMNS: &str = "id, name, is_goalkeeper, active, sort_order";

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: PlayerId::new(row.get(0)?),
        name: row.get(1)?,
        role: Role::from_is_goalkeeper(row.get(2)?),
        active: row.get(3)?,
        sort_order: row.get(4)?,
    })
}

fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: GameId::new(row.get(0)?),
        opponent: row.get(1)?,
        date: row.get(2)?,
    })
}

/// Read `keys` as counters starting at column `offset`
fn read_counts(row: &Row, offset: usize, keys: &[&str]) -> rusqlite::Result<BTreeMap<String, u32>> {
    let mut counts = BTreeMap::new();
    for (i, key) in keys.iter().enumerate() {
        counts.insert(key.to_string(), row.get(offset + i)?);
    }
    Ok(counts)
}

/// `s.key1, s.key2, ...` for a role's counters
fn counter_columns(keys: &[&str]) -> String {
    keys.iter()
        .map(|k| format!("s.{k}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn validated_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StatsError::EmptyName.into());
    }
    Ok(trimmed)
}

fn insert_game(tx: &Transaction, game: &NewGame) -> Result<Game> {
    tx.execute(
        "INSERT INTO games (opponent, game_date) VALUES (?, ?)",
        params![game.opponent, game.date],
    )?;
    let game_id = GameId::new(tx.last_insert_rowid() as u64);

    for row in &game.rows {
        let keys = row.role.counter_keys();
        let placeholders = vec!["?"; keys.len() + 2].join(", ");
        let sql = format!(
            "INSERT INTO {table} (game_id, player_id, {columns}) VALUES ({placeholders})",
            table = stats_table(row.role),
            columns = keys.join(", "),
        );

        let mut values: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(game_id.as_u64()), Box::new(row.player_id.as_u64())];
        for key in &keys {
            values.push(Box::new(row.counts.get(*key).copied().unwrap_or(0)));
        }
        let value_refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();

        tx.execute(&sql, &value_refs[..])
            .with_context(|| format!("saving stats for player {}", row.player_id))?;
    }

    Ok(Game {
        id: game_id,
        opponent: game.opponent.clone(),
        date: game.date,
    })
}

impl TeamDatabase {
    /// Add a player at the end of the roster order
    pub fn add_player(&mut self, name: &str, role: Role) -> Result<Player> {
        let name = validated_name(name)?;
        let max_order: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) FROM players",
            [],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO players (name, is_goalkeeper, active, sort_order)
             VALUES (?, ?, 1, ?)",
            params![name, role.is_goalkeeper(), max_order + 1],
        )?;

        let id = PlayerId::new(self.conn.last_insert_rowid() as u64);
        info!(%id, name, "added player");
        Ok(Player {
            id,
            name: name.to_string(),
            role,
            active: true,
            sort_order: max_order + 1,
        })
    }

    /// Rename a player or change their role.
    ///
    /// The role cannot change once the player has stat rows.
    pub fn update_player(&mut self, id: PlayerId, name: &str, role: Role) -> Result<Player> {
        let name = validated_name(name)?;
        let existing = self.require_player(id)?;

        if existing.role != role && self.count_player_rows(id)? > 0 {
            return Err(StatsError::RoleLocked {
                name: existing.name,
            }
            .into());
        }

        self.conn.execute(
            "UPDATE players SET name = ?, is_goalkeeper = ? WHERE id = ?",
            params![name, role.is_goalkeeper(), id.as_u64()],
        )?;

        Ok(Player {
            name: name.to_string(),
            role,
            ..existing
        })
    }

    /// Soft delete: the player leaves the roster, their rows stay
    pub fn deactivate_player(&mut self, id: PlayerId) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE players SET active = 0 WHERE id = ?",
            params![id.as_u64()],
        )?;
        if updated == 0 {
            return Err(StatsError::PlayerNotFound { id: id.to_string() }.into());
        }
        info!(%id, "deactivated player");
        Ok(())
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?"),
                params![id.as_u64()],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    pub fn require_player(&self, id: PlayerId) -> Result<Player> {
        self.get_player(id)?
            .ok_or_else(|| StatsError::PlayerNotFound { id: id.to_string() }.into())
    }

    /// Active players in roster order
    pub fn list_active_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE active = 1 ORDER BY sort_order, id"
        ))?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    pub fn active_players_by_id(&self) -> Result<HashMap<PlayerId, Player>> {
        Ok(self
            .list_active_players()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect())
    }

    /// Number of stat rows recorded for a player across both tables
    pub fn count_player_rows(&self, id: PlayerId) -> Result<u32> {
        let count = self.conn.query_row(
            "SELECT (SELECT COUNT(*) FROM field_stats WHERE player_id = ?1)
                  + (SELECT COUNT(*) FROM goalkeeper_stats WHERE player_id = ?1)",
            params![id.as_u64()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Write a game and all of its stat rows in one transaction
    pub fn save_game(&mut self, game: &NewGame) -> Result<Game> {
        self.save_game_with(game, None)
    }

    /// Save a game and delete the setting `key` in the same transaction.
    /// Retires the stored live game together with the save.
    pub fn save_game_and_clear(&mut self, game: &NewGame, key: &str) -> Result<Game> {
        self.save_game_with(game, Some(key))
    }

    fn save_game_with(&mut self, game: &NewGame, clear_key: Option<&str>) -> Result<Game> {
        let tx = self.conn.transaction()?;
        let saved = insert_game(&tx, game)?;
        if let Some(key) = clear_key {
            tx.execute("DELETE FROM app_settings WHERE key = ?", params![key])
                .with_context(|| format!("clearing setting {key}"))?;
        }
        tx.commit()?;
        info!(game_id = %saved.id, opponent = %game.opponent, rows = game.rows.len(), "saved game");
        Ok(saved)
    }

    /// All games, newest first
    pub fn list_games(&self) -> Result<Vec<Game>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, opponent, game_date FROM games ORDER BY game_date DESC, id DESC")?;
        let rows = stmt.query_map([], row_to_game)?;

        let mut games = Vec::new();
        for row in rows {
            games.push(row?);
        }
        Ok(games)
    }

    pub fn get_game(&self, id: GameId) -> Result<Option<Game>> {
        let game = self
            .conn
            .query_row(
                "SELECT id, opponent, game_date FROM games WHERE id = ?",
                params![id.as_u64()],
                row_to_game,
            )
            .optional()?;
        Ok(game)
    }

    pub fn require_game(&self, id: GameId) -> Result<Game> {
        self.get_game(id)?
            .ok_or_else(|| StatsError::GameNotFound { id: id.to_string() }.into())
    }

    /// Delete a game; its stat rows go with it
    pub fn delete_game(&mut self, id: GameId) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM games WHERE id = ?", params![id.as_u64()])?;
        debug!(%id, deleted, "delete game");
        Ok(deleted > 0)
    }

    pub fn game_count(&self) -> Result<u32> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Every stat row of one role
    pub fn stat_rows(&self, role: Role) -> Result<Vec<StatRow>> {
        let keys = role.counter_keys();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT s.player_id, s.game_id, {columns} FROM {table} s ORDER BY s.id",
            columns = counter_columns(&keys),
            table = stats_table(role),
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(StatRow::new(
                PlayerId::new(row.get(0)?),
                GameId::new(row.get(1)?),
                read_counts(row, 2, &keys)?,
            ))
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    /// A player's rows with opponent and date, most recently recorded first
    pub fn player_game_lines(&self, player: &Player) -> Result<Vec<PlayerGameLine>> {
        let keys = player.role.counter_keys();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT s.player_id, s.game_id, g.opponent, g.game_date, {columns}
             FROM {table} s
             JOIN games g ON g.id = s.game_id
             WHERE s.player_id = ?
             ORDER BY s.id DESC",
            columns = counter_columns(&keys),
            table = stats_table(player.role),
        ))?;

        let rows = stmt.query_map(params![player.id.as_u64()], |row| {
            Ok(PlayerGameLine {
                opponent: row.get(2)?,
                date: row.get(3)?,
                row: StatRow::new(
                    PlayerId::new(row.get(0)?),
                    GameId::new(row.get(1)?),
                    read_counts(row, 4, &keys)?,
                ),
            })
        })?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    /// One game's rows of one role, with player names, in roster order
    pub fn game_stat_lines(&self, game_id: GameId, role: Role) -> Result<Vec<GameStatLine>> {
        let keys = role.counter_keys();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT s.player_id, s.game_id, p.name, {columns}
             FROM {table} s
             LEFT JOIN players p ON p.id = s.player_id
             WHERE s.game_id = ?
             ORDER BY p.sort_order, s.id",
            columns = counter_columns(&keys),
            table = stats_table(role),
        ))?;

        let rows = stmt.query_map(params![game_id.as_u64()], |row| {
            Ok(GameStatLine {
                player_name: row.get(2)?,
                row: StatRow::new(
                    PlayerId::new(row.get(0)?),
                    GameId::new(row.get(1)?),
                    read_counts(row, 3, &keys)?,
                ),
            })
        })?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete_setting(&mut self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM app_settings WHERE key = ?", params![key])?;
        Ok(deleted > 0)
    }
}
