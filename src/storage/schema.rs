//! Database schema and connection management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use crate::Role;

/// Database connection manager for the team's players, games and stats
pub struct TeamDatabase {
    pub(crate) conn: Connection,
}

impl TeamDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        Self::with_connection(conn)
    }

    /// Default location: `<data dir>/handball-stats/stats.db`
    pub fn default_path() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".local");
            home.push("share");
            home
        });
        base.join("handball-stats").join("stats.db")
    }

    /// Fresh database that lives only as long as the handle
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                is_goalkeeper INTEGER NOT NULL DEFAULT 0,
                active INTEGER NOT NULL DEFAULT 1,
                sort_order INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                opponent TEXT NOT NULL,
                game_date TEXT NOT NULL
            )",
            [],
        )?;

        for role in [Role::FieldPlayer, Role::Goalkeeper] {
            self.conn.execute(&create_stats_table_sql(role), [])?;
            self.conn.execute(
                &format!(
                    "CREATE INDEX IF NOT EXISTS idx_{table}_player ON {table}(player_id)",
                    table = stats_table(role)
                ),
                [],
            )?;
        }

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_games_date ON games(game_date)",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

/// Table holding one role's stat rows
pub(crate) fn stats_table(role: Role) -> &'static str {
    match role {
        Role::FieldPlayer => "field_stats",
        Role::Goalkeeper => "goalkeeper_stats",
    }
}

/// One INTEGER column per catalogue counter, named by its key
fn create_stats_table_sql(role: Role) -> String {
    let columns: Vec<String> = role
        .counter_keys()
        .iter()
        .map(|key| format!("{key} INTEGER NOT NULL DEFAULT 0"))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
            player_id INTEGER NOT NULL REFERENCES players(id),
            {columns},
            UNIQUE (game_id, player_id)
        )",
        table = stats_table(role),
        columns = columns.join(",\n            "),
    )
}
