//! Stat computation core.
//!
//! Pure functions over caller-held data:
//! - `catalogue`: counters recorded per role
//! - `format`: fixed-point rendering shared by every derived number
//! - `aggregate`: totals and averages over stat rows
//! - `efficiency`: field-player efficiency metrics
//! - `leaderboard`: ranking players by one counter
//! - `profile`: one player's aggregate plus efficiency
//! - `compare`: side-by-side comparison of two profiles

pub mod aggregate;
pub mod catalogue;
pub mod compare;
pub mod efficiency;
pub mod format;
pub mod leaderboard;
pub mod profile;

pub use aggregate::{aggregate, aggregate_by_player, team_totals, Aggregate, StatRow};
pub use catalogue::{
    counter_role, empty_counters, find_counter, stats_for_role, CounterDef, EFFICIENCY_STATS,
    FIELD_PLAYER_STATS, GOALKEEPER_STATS,
};
pub use compare::{compare_profiles, comparison_counters, Comparison, Winner};
pub use efficiency::{efficiency, Efficiency, Metric};
pub use leaderboard::{rank, Leaderboard, LeaderboardEntry};
pub use profile::PlayerProfile;
