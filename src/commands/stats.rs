//! Leaderboards and team totals.

use super::common::{print_json, CommandContext};
use crate::{
    error::StatsError,
    stats::{
        aggregate_by_player, counter_role, find_counter, rank, team_totals, Aggregate, Leaderboard,
    },
    Result, Role,
};

const BAR_WIDTH: usize = 20;

/// Rank active players by `key`, keeping at most `limit` entries.
pub fn leaderboard(ctx: &CommandContext, key: &str, limit: Option<usize>) -> Result<Leaderboard> {
    let role = counter_role(key).ok_or_else(|| StatsError::UnknownCounter {
        key: key.to_string(),
    })?;

    let rows = ctx.db.stat_rows(role)?;
    let per_player = aggregate_by_player(&rows, &role.counter_keys());
    let players = ctx.db.active_players_by_id()?;

    let mut board = rank(&per_player, key, &players);
    if let Some(limit) = limit {
        board.entries.truncate(limit);
    }
    Ok(board)
}

pub fn handle_leaders(ctx: &CommandContext, key: &str, limit: Option<usize>) -> Result<()> {
    let board = leaderboard(ctx, key, limit)?;

    if ctx.output.json {
        return print_json(&board);
    }

    let label = find_counter(key).map_or(key, |c| c.label);
    println!("{label}");
    if board.is_empty() {
        println!("No players have recorded {label} yet.");
        return Ok(());
    }

    for (i, entry) in board.entries.iter().enumerate() {
        let ratio = board.bar_ratio(entry).unwrap_or(0.0);
        let bar = "█".repeat((ratio * BAR_WIDTH as f64).round() as usize);
        println!(
            "{:>2}. {:<20} {:>5} {:>6}/g  {}",
            i + 1,
            entry.player.name,
            entry.total,
            entry.average,
            bar
        );
    }
    Ok(())
}

/// Team totals for one role, averaged over every saved game.
pub fn totals(ctx: &CommandContext, role: Role) -> Result<Aggregate> {
    let keys = role.counter_keys();
    let rows = ctx.db.stat_rows(role)?;
    let per_player = aggregate_by_player(&rows, &keys);
    Ok(team_totals(&per_player, &keys, ctx.db.game_count()?))
}

pub fn handle_totals(ctx: &CommandContext, role: Role) -> Result<()> {
    let totals = totals(ctx, role)?;

    if ctx.output.json {
        return print_json(&totals);
    }

    println!("{} | Games: {}", role.label(), totals.games);
    println!("{:<22} {:>7} {:>9}", "Stat", "Total", "Per game");
    for counter in role.catalogue() {
        println!(
            "{:<22} {:>7} {:>9}",
            counter.label,
            totals.total(counter.key),
            totals.average(counter.key).unwrap_or("0.0")
        );
    }
    Ok(())
}
