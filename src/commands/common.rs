//! Common utilities and helper functions shared across commands.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::{
    error::Result,
    report::DEFAULT_TEAM_NAME,
    session::{LiveGame, SessionState},
    storage::{Player, TeamDatabase},
    PlayerId, TEAM_ENV_VAR,
};

/// Settings key holding the game being recorded, as JSON.
pub const LIVE_GAME_KEY: &str = "live_game";

/// Output options shared by every handler
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub verbose: bool,
    pub team: String,
}

impl OutputOptions {
    pub fn new(json: bool, verbose: bool) -> Self {
        Self {
            json,
            verbose,
            team: team_name(),
        }
    }

    /// Progress lines are printed only with `--verbose` and never into JSON output
    pub fn shows_progress(&self) -> bool {
        self.verbose && !self.json
    }
}

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub db: TeamDatabase,
    pub output: OutputOptions,
}

impl CommandContext {
    /// Open the database and, unless `gated` is false, check the PIN
    pub fn open(
        db_path: Option<PathBuf>,
        pin: Option<&str>,
        gated: bool,
        output: OutputOptions,
    ) -> Result<Self> {
        let path = db_path.unwrap_or_else(TeamDatabase::default_path);
        if output.shows_progress() {
            println!("Connecting to database at {}...", path.display());
        }
        let db = TeamDatabase::open(&path)?;

        let ctx = Self::with_database(db, output);
        if gated {
            ctx.unlock(pin)?;
        }
        Ok(ctx)
    }

    pub fn with_database(db: TeamDatabase, output: OutputOptions) -> Self {
        Self { db, output }
    }

    pub fn unlock(&self, pin: Option<&str>) -> Result<()> {
        crate::pin::unlock(&self.db, pin)
    }

    /// The stored live game, or Idle
    pub fn load_session(&self) -> Result<SessionState> {
        match self.db.get_setting(LIVE_GAME_KEY)? {
            Some(json) => {
                let game: LiveGame = serde_json::from_str(&json)?;
                debug!(opponent = %game.opponent, "resumed live game");
                Ok(SessionState::recording(game))
            }
            None => Ok(SessionState::Idle),
        }
    }

    /// Persist a recording game; Idle clears it
    pub fn store_session(&mut self, state: &SessionState) -> Result<()> {
        match state {
            SessionState::Recording(game) => {
                self.db
                    .set_setting(LIVE_GAME_KEY, &serde_json::to_string(game)?)?;
            }
            SessionState::Idle => {
                self.db.delete_setting(LIVE_GAME_KEY)?;
            }
            // Saving is never left behind by a handler
            SessionState::Saving(_) => {}
        }
        Ok(())
    }

    /// Look up a player, active or not
    pub fn player(&self, id: PlayerId) -> Result<Player> {
        Ok(self.db.require_player(id)?)
    }

    pub fn status(&self, message: &str) {
        if !self.output.json {
            println!("✓ {message}");
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.output.shows_progress() {
            println!("{message}");
        }
    }
}

/// Team name used in reports
pub fn team_name() -> String {
    std::env::var(TEAM_ENV_VAR)
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_TEAM_NAME.to_string())
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write `contents` to `path`, creating parent directories
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}
