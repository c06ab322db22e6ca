//! Handball Stats Library
//!
//! Statistics tracking for a handball team: a roster of field players and
//! goalkeepers, per-game counters recorded live, and the aggregates built
//! from them.
//!
//! ## Features
//!
//! - **Live Recording**: Tap counters for every roster player during a game
//! - **Aggregation**: Totals, per-game averages and team totals
//! - **Efficiency**: Shot percentage, assist/turnover ratio and rating
//! - **Leaderboards**: Rank players by any counter
//! - **Comparison**: Side-by-side view of two players
//! - **Reports**: Game and player exports as JSON or text
//! - **PIN Gate**: Optional 4-digit PIN on every command
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use handball_stats::{stats::{aggregate, efficiency}, storage::TeamDatabase, Role};
//!
//! # fn example() -> handball_stats::Result<()> {
//! let db = TeamDatabase::open_in_memory()?;
//! let rows = db.stat_rows(Role::FieldPlayer)?;
//! let keys = Role::FieldPlayer.counter_keys();
//!
//! let agg = aggregate(&rows, &keys);
//! let eff = efficiency(&agg.totals, agg.games);
//! println!("Shot %: {}", eff.shot_pct);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export HANDBALL_STATS_DB=~/handball/stats.db
//! export HANDBALL_STATS_PIN=1234
//! export HANDBALL_STATS_TEAM=Grotta
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod pin;
pub mod report;
pub mod session;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{GameId, PlayerId, Role};
pub use error::{Result, StatsError};
pub use stats::{Aggregate, Efficiency, Metric, StatRow};

pub const DB_PATH_ENV_VAR: &str = "HANDBALL_STATS_DB";
pub const PIN_ENV_VAR: &str = "HANDBALL_STATS_PIN";
pub const TEAM_ENV_VAR: &str = "HANDBALL_STATS_TEAM";
