//! Saved game commands: list, show, delete and export.

use std::path::PathBuf;

use super::common::{print_json, write_report, CommandContext};
use crate::{
    cli::ExportArgs,
    error::StatsError,
    report::GameReport,
    GameId, Result,
};

pub fn handle_game_list(ctx: &CommandContext) -> Result<()> {
    let games = ctx.db.list_games()?;

    if ctx.output.json {
        return print_json(&games);
    }

    if games.is_empty() {
        println!("No games saved yet.");
        return Ok(());
    }

    println!("{:<6} {:<12} Opponent", "ID", "Date");
    println!("{:<6} {:<12} --------", "--", "----");
    for game in &games {
        println!(
            "{:<6} {:<12} {}",
            game.id,
            game.date.format("%Y-%m-%d"),
            game.opponent
        );
    }
    Ok(())
}

pub fn handle_game_show(ctx: &CommandContext, id: GameId) -> Result<()> {
    let report = GameReport::load(&ctx.db, id, &ctx.output.team)?;
    if ctx.output.json {
        print_json(&report)
    } else {
        print!("{}", report.render_detail());
        Ok(())
    }
}

pub fn handle_game_delete(ctx: &mut CommandContext, id: GameId) -> Result<()> {
    let game = ctx.db.require_game(id)?;
    if !ctx.db.delete_game(id)? {
        return Err(StatsError::GameNotFound { id: id.to_string() });
    }
    ctx.status(&format!(
        "Deleted game vs {} on {}",
        game.opponent,
        game.date.format("%Y-%m-%d")
    ));
    Ok(())
}

pub fn handle_game_export(ctx: &CommandContext, id: GameId, export: &ExportArgs) -> Result<PathBuf> {
    let report = GameReport::load(&ctx.db, id, &ctx.output.team)?;
    let path = export
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report.default_file_name(export.format)));

    write_report(&path, &report.render(export.format)?)?;
    ctx.status(&format!("Game report written to {}", path.display()));
    Ok(path)
}
