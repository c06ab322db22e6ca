//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use handball_stats::{
    cli::{Commands, GameCmd, HandballStats, PinCmd, PlayerCmd, StatsCmd},
    commands::{
        common::{CommandContext, OutputOptions},
        compare::handle_compare,
        games::{handle_game_delete, handle_game_export, handle_game_list, handle_game_show},
        pin::{handle_pin_change, handle_pin_setup},
        players::{
            handle_player_add, handle_player_edit, handle_player_export, handle_player_list,
            handle_player_remove, handle_player_show,
        },
        session::{
            handle_game_discard, handle_game_save, handle_game_start, handle_game_status,
            handle_game_tap,
        },
        stats::{handle_leaders, handle_totals},
    },
    Result,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("handball_stats=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let app = HandballStats::parse();
    init_tracing(app.verbose);

    if let Err(e) = run(app) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Run the CLI.
fn run(app: HandballStats) -> Result<()> {
    let output = OutputOptions::new(app.json, app.verbose);
    let gated = !app.command.skips_pin_gate();
    let mut ctx = CommandContext::open(app.db, app.pin.as_deref(), gated, output)?;

    match app.command {
        Commands::Pin { cmd } => match cmd {
            PinCmd::Setup { pin, confirm } => handle_pin_setup(&mut ctx, &pin, &confirm)?,
            PinCmd::Change {
                current,
                new,
                confirm,
            } => handle_pin_change(&mut ctx, &current, &new, &confirm)?,
        },

        Commands::Player { cmd } => match cmd {
            PlayerCmd::Add { name, role } => {
                handle_player_add(&mut ctx, &name, role)?;
            }
            PlayerCmd::Edit { id, name, role } => {
                handle_player_edit(&mut ctx, id, name, role)?;
            }
            PlayerCmd::Remove { id } => handle_player_remove(&mut ctx, id)?,
            PlayerCmd::List { search } => handle_player_list(&ctx, search.as_deref())?,
            PlayerCmd::Show { id } => handle_player_show(&ctx, id)?,
            PlayerCmd::Export { id, export } => {
                handle_player_export(&ctx, id, &export)?;
            }
        },

        Commands::Game { cmd } => match cmd {
            GameCmd::Start { opponent, date } => handle_game_start(&mut ctx, &opponent, date)?,
            GameCmd::Tap {
                player,
                stat,
                minus,
                mode,
            } => {
                handle_game_tap(&mut ctx, player, &stat, GameCmd::tap_mode(minus, mode))?;
            }
            GameCmd::Status => handle_game_status(&ctx)?,
            GameCmd::Save => {
                handle_game_save(&mut ctx)?;
            }
            GameCmd::Discard => handle_game_discard(&mut ctx)?,
            GameCmd::List => handle_game_list(&ctx)?,
            GameCmd::Show { id } => handle_game_show(&ctx, id)?,
            GameCmd::Delete { id } => handle_game_delete(&mut ctx, id)?,
            GameCmd::Export { id, export } => {
                handle_game_export(&ctx, id, &export)?;
            }
        },

        Commands::Stats { cmd } => match cmd {
            StatsCmd::Leaders { stat, limit } => handle_leaders(&ctx, &stat, limit)?,
            StatsCmd::Totals { role } => handle_totals(&ctx, role)?,
        },

        Commands::Compare { a, b } => handle_compare(&ctx, a, b)?,
    }

    Ok(())
}
