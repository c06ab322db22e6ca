//! Head-to-head player comparison.

use serde::Serialize;

use super::common::{print_json, CommandContext};
use crate::{
    error::StatsError,
    stats::{compare_profiles, Comparison, PlayerProfile, Winner},
    PlayerId, Result,
};

#[derive(Debug, Serialize)]
pub struct ComparisonView {
    pub a: PlayerProfile,
    pub b: PlayerProfile,
    pub comparison: Comparison,
}

fn profile(ctx: &CommandContext, id: PlayerId) -> Result<PlayerProfile> {
    let player = ctx.player(id)?;
    let rows: Vec<_> = ctx
        .db
        .player_game_lines(&player)?
        .into_iter()
        .map(|line| line.row)
        .collect();
    Ok(PlayerProfile::build(player, &rows))
}

pub fn comparison(ctx: &CommandContext, a: PlayerId, b: PlayerId) -> Result<ComparisonView> {
    if a == b {
        return Err(StatsError::SamePlayer);
    }
    let a = profile(ctx, a)?;
    let b = profile(ctx, b)?;
    let comparison = compare_profiles(&a, &b);
    Ok(ComparisonView { a, b, comparison })
}

fn mark(winner: Winner, side: Winner) -> &'static str {
    if winner == side {
        "*"
    } else {
        " "
    }
}

pub fn handle_compare(ctx: &CommandContext, a: PlayerId, b: PlayerId) -> Result<()> {
    let view = comparison(ctx, a, b)?;

    if ctx.output.json {
        return print_json(&view);
    }

    println!(
        "{:<22} {:>16} {:>16}",
        "",
        view.a.player.name,
        view.b.player.name
    );
    println!(
        "{:<22} {:>16} {:>16}",
        "Games",
        view.a.games(),
        view.b.games()
    );

    for row in &view.comparison.counters {
        let side = |total: Option<u32>, average: &Option<String>| match (total, average) {
            (Some(total), Some(average)) => format!("{total} ({average})"),
            _ => "-".to_string(),
        };
        println!(
            "{:<22} {:>15}{} {:>15}{}",
            row.counter.label,
            side(row.a_total, &row.a_average),
            mark(row.winner, Winner::A),
            side(row.b_total, &row.b_average),
            mark(row.winner, Winner::B),
        );
    }

    if !view.comparison.efficiency.is_empty() {
        println!();
        for row in &view.comparison.efficiency {
            println!(
                "{:<22} {:>15}{} {:>15}{}",
                row.metric.label,
                row.a_value,
                mark(row.winner, Winner::A),
                row.b_value,
                mark(row.winner, Winner::B),
            );
        }
    }
    Ok(())
}
