//! Roster commands: add, edit, remove, list, show and export.

use std::path::PathBuf;

use super::common::{print_json, write_report, CommandContext};
use crate::{
    cli::ExportArgs,
    error::StatsError,
    report::PlayerReport,
    storage::Player,
    PlayerId, Result, Role,
};

pub fn handle_player_add(ctx: &mut CommandContext, name: &str, role: Role) -> Result<Player> {
    let player = ctx.db.add_player(name, role)?;
    if ctx.output.json {
        print_json(&player)?;
    } else {
        ctx.status(&format!(
            "Added {} ({}) with id {}",
            player.name,
            player.role.label(),
            player.id
        ));
    }
    Ok(player)
}

pub fn handle_player_edit(
    ctx: &mut CommandContext,
    id: PlayerId,
    name: Option<String>,
    role: Option<Role>,
) -> Result<Player> {
    let existing = ctx.player(id)?;
    let name = name.unwrap_or(existing.name);
    let role = role.unwrap_or(existing.role);

    // The live game already holds this player's row under the old role
    if role != existing.role {
        let state = ctx.load_session()?;
        if state.live_game().and_then(|g| g.entry(id)).is_some() {
            return Err(StatsError::RoleLockedDuringGame { name });
        }
    }

    let player = ctx.db.update_player(id, &name, role)?;
    if ctx.output.json {
        print_json(&player)?;
    } else {
        ctx.status(&format!("Updated {} ({})", player.name, player.role.label()));
    }
    Ok(player)
}

pub fn handle_player_remove(ctx: &mut CommandContext, id: PlayerId) -> Result<()> {
    let player = ctx.player(id)?;
    ctx.db.deactivate_player(id)?;
    ctx.status(&format!(
        "Removed {} from the roster (recorded stats are kept)",
        player.name
    ));
    Ok(())
}

/// Active players matching `search`, field players first, each group in
/// roster order.
pub fn roster(ctx: &CommandContext, search: Option<&str>) -> Result<Vec<Player>> {
    let needle = search.map(|s| s.trim().to_lowercase());
    let mut players: Vec<Player> = ctx
        .db
        .list_active_players()?
        .into_iter()
        .filter(|p| {
            needle
                .as_deref()
                .map_or(true, |n| p.name.to_lowercase().contains(n))
        })
        .collect();
    // Stable sort keeps roster order within each role
    players.sort_by_key(|p| p.role.is_goalkeeper());
    Ok(players)
}

pub fn handle_player_list(ctx: &CommandContext, search: Option<&str>) -> Result<()> {
    let players = roster(ctx, search)?;

    if ctx.output.json {
        return print_json(&players);
    }

    if players.is_empty() {
        println!("No players found.");
        return Ok(());
    }

    for role in [Role::FieldPlayer, Role::Goalkeeper] {
        let group: Vec<_> = players.iter().filter(|p| p.role == role).collect();
        if group.is_empty() {
            continue;
        }
        println!("{} ({})", role.label(), group.len());
        for player in group {
            println!("{:>5}  {}", player.id, player.name);
        }
        println!();
    }
    Ok(())
}

pub fn handle_player_show(ctx: &CommandContext, id: PlayerId) -> Result<()> {
    let report = PlayerReport::load(&ctx.db, id, &ctx.output.team)?;
    if ctx.output.json {
        print_json(&report)
    } else {
        print!("{}", report.render_text());
        Ok(())
    }
}

pub fn handle_player_export(
    ctx: &CommandContext,
    id: PlayerId,
    export: &ExportArgs,
) -> Result<PathBuf> {
    let report = PlayerReport::load(&ctx.db, id, &ctx.output.team)?;
    let path = export
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report.default_file_name(export.format)));

    write_report(&path, &report.render(export.format)?)?;
    ctx.status(&format!("Player report written to {}", path.display()));
    Ok(path)
}
