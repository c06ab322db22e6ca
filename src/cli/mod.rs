//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use types::{GameId, PlayerId, Role};

use crate::{report::ReportFormat, session::TapMode};

/// Where an export goes and in which format
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file. Defaults to a name built from the team and game/player.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Report format.
    #[clap(long, short, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,
}

#[derive(Debug, Subcommand)]
pub enum PinCmd {
    /// Set the first PIN. Every other command then requires it.
    Setup {
        /// New 4-digit PIN.
        pin: String,

        /// The same PIN again.
        confirm: String,
    },

    /// Replace the PIN after checking the current one.
    Change {
        /// Current PIN.
        current: String,

        /// New 4-digit PIN.
        new: String,

        /// The new PIN again.
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Add a player to the end of the roster.
    Add {
        /// Player name.
        name: String,

        /// Field player or goalkeeper.
        #[clap(long, short, value_enum, default_value_t = Role::FieldPlayer)]
        role: Role,
    },

    /// Rename a player or change their role.
    ///
    /// The role is locked once the player has recorded stats.
    Edit {
        id: PlayerId,

        /// New name.
        #[clap(long, short)]
        name: Option<String>,

        /// New role.
        #[clap(long, short, value_enum)]
        role: Option<Role>,
    },

    /// Remove a player from the roster. Their recorded stats are kept.
    Remove { id: PlayerId },

    /// List active players, field players first.
    List {
        /// Case-insensitive name filter (substring match).
        #[clap(long, short)]
        search: Option<String>,
    },

    /// Totals, averages, efficiency and game log for one player.
    Show { id: PlayerId },

    /// Write a player report to a file.
    Export {
        id: PlayerId,

        #[clap(flatten)]
        export: ExportArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum GameCmd {
    /// Start recording a game with every active roster player at zero.
    Start {
        /// Opposing team.
        opponent: String,

        /// Game date (YYYY-MM-DD). Defaults to today.
        #[clap(long, short)]
        date: Option<NaiveDate>,
    },

    /// Add (or with `--minus` remove) one to a player's counter.
    Tap {
        player: PlayerId,

        /// Counter key, e.g. `mork` or `varin_skot`.
        stat: String,

        /// Subtract instead of add. Counters never go below zero.
        #[clap(long, conflicts_with = "mode")]
        minus: bool,

        /// Explicit tap mode.
        #[clap(long, value_enum)]
        mode: Option<TapMode>,
    },

    /// Show the game being recorded.
    Status,

    /// Save the game being recorded.
    Save,

    /// Throw away the game being recorded.
    Discard,

    /// List saved games, newest first.
    List,

    /// Show one saved game.
    Show { id: GameId },

    /// Delete a saved game and all of its stats.
    Delete { id: GameId },

    /// Write a game report to a file.
    Export {
        id: GameId,

        #[clap(flatten)]
        export: ExportArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum StatsCmd {
    /// Rank players by one counter.
    Leaders {
        /// Counter key to rank by.
        #[clap(long, short, default_value = "mork")]
        stat: String,

        /// Show only the top N players.
        #[clap(long, short)]
        limit: Option<usize>,
    },

    /// Whole-team totals and per-game averages.
    Totals {
        /// Which catalogue to total.
        #[clap(long, short, value_enum, default_value_t = Role::FieldPlayer)]
        role: Role,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "handball-stats", about = "Handball team statistics CLI", version)]
pub struct HandballStats {
    /// Database file (or set `HANDBALL_STATS_DB` env var).
    #[clap(long, global = true, env = "HANDBALL_STATS_DB")]
    pub db: Option<PathBuf>,

    /// PIN, when one is set (or set `HANDBALL_STATS_PIN` env var).
    #[clap(long, global = true, env = "HANDBALL_STATS_PIN", hide_env_values = true)]
    pub pin: Option<String>,

    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,

    /// Print progress details and debug logs.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Set up or change the PIN
    Pin {
        #[clap(subcommand)]
        cmd: PinCmd,
    },

    /// Manage the roster
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// Record and browse games
    Game {
        #[clap(subcommand)]
        cmd: GameCmd,
    },

    /// Leaderboards and team totals
    Stats {
        #[clap(subcommand)]
        cmd: StatsCmd,
    },

    /// Compare two players side by side
    Compare { a: PlayerId, b: PlayerId },
}

impl Commands {
    /// Commands reachable without the PIN.
    pub fn skips_pin_gate(&self) -> bool {
        matches!(self, Commands::Pin { .. })
    }
}

impl GameCmd {
    pub fn tap_mode(minus: bool, mode: Option<TapMode>) -> TapMode {
        match mode {
            Some(mode) => mode,
            None if minus => TapMode::Minus,
            None => TapMode::Plus,
        }
    }
}
