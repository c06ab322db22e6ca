//! Game and player reports.
//!
//! A report gathers everything needed to export one game or one player's
//! season and renders it as pretty JSON or a plain text table.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::Result,
    stats::{CounterDef, Efficiency, PlayerProfile, EFFICIENCY_STATS},
    storage::{Game, GameStatLine, Player, PlayerGameLine, TeamDatabase},
    GameId, PlayerId, Role,
};

pub const DEFAULT_TEAM_NAME: &str = "Grotta";
const MISSING_PLAYER: &str = "?";
const NAME_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

/// One player's counters in a game report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub player_id: PlayerId,
    pub player_name: String,
    pub counts: BTreeMap<String, u32>,
}

impl From<GameStatLine> for ReportRow {
    fn from(line: GameStatLine) -> Self {
        Self {
            player_id: line.row.player_id,
            player_name: line
                .player_name
                .unwrap_or_else(|| MISSING_PLAYER.to_string()),
            counts: line.row.counts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub team: String,
    pub game: Game,
    pub field_rows: Vec<ReportRow>,
    pub goalkeeper_rows: Vec<ReportRow>,
}

impl GameReport {
    pub fn load(db: &TeamDatabase, game_id: GameId, team: &str) -> Result<Self> {
        let game = db.require_game(game_id)?;
        let field_rows = db
            .game_stat_lines(game_id, Role::FieldPlayer)?
            .into_iter()
            .map(ReportRow::from)
            .collect();
        let goalkeeper_rows = db
            .game_stat_lines(game_id, Role::Goalkeeper)?
            .into_iter()
            .map(ReportRow::from)
            .collect();

        Ok(Self {
            team: team.to_string(),
            game,
            field_rows,
            goalkeeper_rows,
        })
    }

    pub fn rows(&self, role: Role) -> &[ReportRow] {
        match role {
            Role::FieldPlayer => &self.field_rows,
            Role::Goalkeeper => &self.goalkeeper_rows,
        }
    }

    /// Rows with at least one non-zero counter.
    pub fn visible_rows(&self, role: Role) -> Vec<&ReportRow> {
        let keys = role.counter_keys();
        self.rows(role)
            .iter()
            .filter(|row| keys.iter().any(|k| row.counts.get(*k).copied().unwrap_or(0) > 0))
            .collect()
    }

    pub fn default_file_name(&self, format: ReportFormat) -> String {
        file_name(
            &format!(
                "{}_vs_{}_{}",
                self.team,
                self.game.opponent,
                self.game.date.format("%Y-%m-%d")
            ),
            format,
        )
    }

    /// Full text table with every saved row, as exported.
    pub fn render_text(&self) -> String {
        self.text_table(|role| self.rows(role).iter().collect())
    }

    /// On-screen game detail, skipping players who recorded nothing.
    pub fn render_detail(&self) -> String {
        self.text_table(|role| self.visible_rows(role))
    }

    fn text_table<'a>(&'a self, rows_for: impl Fn(Role) -> Vec<&'a ReportRow>) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} vs {} ({})",
            self.team,
            self.game.opponent,
            self.game.date.format("%Y-%m-%d")
        );

        for role in [Role::FieldPlayer, Role::Goalkeeper] {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", role.label());
            let rows = rows_for(role);
            if rows.is_empty() {
                let _ = writeln!(out, "No stats recorded");
                continue;
            }
            write_header(&mut out, role.catalogue());
            for row in rows {
                write_counts(&mut out, &row.player_name, role.catalogue(), &row.counts);
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }
}

/// One game of a player report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerGameRow {
    pub opponent: String,
    pub date: NaiveDate,
    pub counts: BTreeMap<String, u32>,
}

impl From<PlayerGameLine> for PlayerGameRow {
    fn from(line: PlayerGameLine) -> Self {
        Self {
            opponent: line.opponent,
            date: line.date,
            counts: line.row.counts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub team: String,
    pub player: Player,
    pub games: u32,
    pub totals: BTreeMap<String, u32>,
    pub averages: BTreeMap<String, String>,
    pub efficiency: Option<Efficiency>,
    pub game_rows: Vec<PlayerGameRow>,
}

impl PlayerReport {
    pub fn load(db: &TeamDatabase, player_id: PlayerId, team: &str) -> Result<Self> {
        let player = db.require_player(player_id)?;
        let lines = db.player_game_lines(&player)?;
        Ok(Self::build(team, player, lines))
    }

    /// Build from a player's game lines, newest first.
    pub fn build(team: &str, player: Player, lines: Vec<PlayerGameLine>) -> Self {
        let rows: Vec<_> = lines.iter().map(|l| l.row.clone()).collect();
        let profile = PlayerProfile::build(player, &rows);

        Self {
            team: team.to_string(),
            games: profile.games(),
            totals: profile.aggregate.totals,
            averages: profile.aggregate.averages,
            efficiency: profile.efficiency,
            player: profile.player,
            game_rows: lines.into_iter().map(PlayerGameRow::from).collect(),
        }
    }

    pub fn default_file_name(&self, format: ReportFormat) -> String {
        file_name(&format!("{}_{}", self.team, self.player.name), format)
    }

    pub fn render_text(&self) -> String {
        let role = self.player.role;
        let catalogue = role.catalogue();
        let mut out = String::new();

        let _ = writeln!(out, "{} - {}", self.team, self.player.name);
        let _ = writeln!(out, "{} | Games: {}", role.label(), self.games);
        let _ = writeln!(out);

        write_header(&mut out, catalogue);
        write_counts(&mut out, "Total", catalogue, &self.totals);
        let _ = write!(out, "{:<w$}", "Average", w = NAME_WIDTH);
        for counter in catalogue {
            let average = self.averages.get(counter.key).map_or("0.0", String::as_str);
            let _ = write!(out, " {:>width$}", average, width = column_width(counter));
        }
        let _ = writeln!(out);

        if let Some(efficiency) = &self.efficiency {
            let _ = writeln!(out);
            for metric in EFFICIENCY_STATS.iter() {
                if let Some(value) = efficiency.display_value(metric.key) {
                    let _ = writeln!(out, "{:<w$} {}", metric.label, value, w = NAME_WIDTH);
                }
            }
        }

        if !self.game_rows.is_empty() {
            let _ = writeln!(out);
            write_header(&mut out, catalogue);
            for game in &self.game_rows {
                let label = format!("{} {}", game.date.format("%d.%m"), game.opponent);
                write_counts(&mut out, &label, catalogue, &game.counts);
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }
}

/// `stem.ext` with path separators and whitespace replaced by `_`.
fn file_name(stem: &str, format: ReportFormat) -> String {
    let safe: String = stem
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{safe}.{}", format.extension())
}

fn column_width(counter: &CounterDef) -> usize {
    counter.key.chars().count().max(4)
}

fn write_header(out: &mut String, catalogue: &[CounterDef]) {
    let _ = write!(out, "{:<w$}", "Name", w = NAME_WIDTH);
    for counter in catalogue {
        let _ = write!(out, " {:>width$}", counter.key, width = column_width(counter));
    }
    let _ = writeln!(out);
}

fn write_counts(
    out: &mut String,
    name: &str,
    catalogue: &[CounterDef],
    counts: &BTreeMap<String, u32>,
) {
    let name: String = name.chars().take(NAME_WIDTH).collect();
    let _ = write!(out, "{:<w$}", name, w = NAME_WIDTH);
    for counter in catalogue {
        let value = counts.get(counter.key).copied().unwrap_or(0);
        let _ = write!(out, " {:>width$}", value, width = column_width(counter));
    }
    let _ = writeln!(out);
}
