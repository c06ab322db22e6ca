//! Live game commands: start, tap, status, save and discard.
//!
//! Each invocation loads the recording game from the settings table,
//! applies one transition and stores the result.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::common::{print_json, CommandContext, LIVE_GAME_KEY};
use crate::{
    error::StatsError,
    session::TapMode,
    storage::Game,
    PlayerId, Result, Role,
};

pub fn handle_game_start(
    ctx: &mut CommandContext,
    opponent: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut state = ctx.load_session()?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let roster = ctx.db.list_active_players()?;

    state.start(opponent, date, &roster)?;
    ctx.store_session(&state)?;

    if let Some(game) = state.live_game() {
        ctx.status(&format!(
            "Recording vs {} on {} with {} players",
            game.opponent,
            game.date.format("%Y-%m-%d"),
            game.entries.len()
        ));
    }
    Ok(())
}

pub fn handle_game_tap(
    ctx: &mut CommandContext,
    player_id: PlayerId,
    key: &str,
    mode: TapMode,
) -> Result<u32> {
    let mut state = ctx.load_session()?;
    let value = state.tap(player_id, key, mode)?;
    ctx.store_session(&state)?;
    debug!(%player_id, key, ?mode, value, "tap");

    let name = state
        .live_game()
        .and_then(|g| g.entry(player_id))
        .map_or("?", |e| e.name.as_str());
    if ctx.output.json {
        print_json(&serde_json::json!({
            "player_id": player_id,
            "stat": key,
            "value": value,
        }))?;
    } else {
        println!("{name}: {key} = {value}");
    }
    Ok(value)
}

pub fn handle_game_status(ctx: &CommandContext) -> Result<()> {
    let state = ctx.load_session()?;
    let Some(game) = state.live_game() else {
        if ctx.output.json {
            return print_json(&serde_json::Value::Null);
        }
        println!("No game in progress.");
        return Ok(());
    };

    if ctx.output.json {
        return print_json(game);
    }

    println!("Live: vs {} ({})", game.opponent, game.date.format("%Y-%m-%d"));
    for role in [Role::FieldPlayer, Role::Goalkeeper] {
        let entries: Vec<_> = game.entries_for(role).collect();
        if entries.is_empty() {
            continue;
        }
        println!();
        println!("{}", role.label());
        print!("{:<6} {:<20}", "ID", "Name");
        for counter in role.catalogue() {
            print!(" {:>w$}", counter.key, w = counter.key.len().max(4));
        }
        println!();
        for entry in entries {
            print!("{:<6} {:<20}", entry.player_id, entry.name);
            for counter in role.catalogue() {
                let value = entry.counts.get(counter.key).copied().unwrap_or(0);
                print!(" {:>w$}", value, w = counter.key.len().max(4));
            }
            println!();
        }
    }
    Ok(())
}

/// Save the recording game. The stored live game is removed in the same
/// transaction; a failed save leaves it, and every counter, untouched.
pub fn handle_game_save(ctx: &mut CommandContext) -> Result<Game> {
    let mut state = ctx.load_session()?;
    let new_game = state.begin_save()?;

    let outcome = ctx
        .db
        .save_game_and_clear(&new_game, LIVE_GAME_KEY)
        .map_err(StatsError::from);
    let outcome = state.finish_save(outcome);
    if let Err(err) = &outcome {
        warn!(error = %err, "saving game failed, still recording");
    }

    let game = outcome?;
    if ctx.output.json {
        print_json(&game)?;
    } else {
        ctx.status(&format!(
            "Saved game {} vs {} ({} players)",
            game.id,
            game.opponent,
            new_game.rows.len()
        ));
    }
    Ok(game)
}

pub fn handle_game_discard(ctx: &mut CommandContext) -> Result<()> {
    let mut state = ctx.load_session()?;
    let Some(opponent) = state.live_game().map(|g| g.opponent.clone()) else {
        return Err(StatsError::NoActiveGame);
    };

    state.discard();
    ctx.store_session(&state)?;
    ctx.status(&format!("Discarded game vs {opponent}"));
    Ok(())
}
