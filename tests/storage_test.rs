//! Integration tests for the storage layer

use chrono::NaiveDate;
use handball_stats::{
    session::{SessionState, TapMode},
    stats::{aggregate_by_player, team_totals, PlayerProfile},
    storage::*,
    Role,
};

fn create_test_db() -> TeamDatabase {
    TeamDatabase::open_in_memory().unwrap()
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

/// Record a game through the session state machine and save it
fn record_game(db: &mut TeamDatabase, opponent: &str, day: NaiveDate, taps: &[(&Player, &str, u32)]) -> Game {
    let roster = db.list_active_players().unwrap();
    let mut state = SessionState::default();
    state.start(opponent, day, &roster).unwrap();
    for (player, key, n) in taps {
        for _ in 0..*n {
            state.tap(player.id, key, TapMode::Plus).unwrap();
        }
    }
    let new_game = state.begin_save().unwrap();
    let saved = state.finish_save(db.save_game(&new_game)).unwrap();
    assert!(state.is_idle());
    saved
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_data_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.db");

    {
        let mut db = TeamDatabase::open(&path).unwrap();
        let anna = db.add_player("Anna", Role::FieldPlayer).unwrap();
        record_game(&mut db, "Valur", date(2, 1), &[(&anna, "mork", 3)]);
        db.set_setting("pin_hash", "abc").unwrap();
    }

    let db = TeamDatabase::open(&path).unwrap();
    assert_eq!(db.list_active_players().unwrap().len(), 1);
    assert_eq!(db.game_count().unwrap(), 1);
    assert_eq!(db.stat_rows(Role::FieldPlayer).unwrap()[0].count("mork"), 3);
    assert_eq!(db.get_setting("pin_hash").unwrap().as_deref(), Some("abc"));
}

#[test]
fn test_season_profile_and_team_totals() {
    let mut db = create_test_db();
    let anna = db.add_player("Anna", Role::FieldPlayer).unwrap();
    let birna = db.add_player("Birna", Role::FieldPlayer).unwrap();
    let gk = db.add_player("Gunnar", Role::Goalkeeper).unwrap();

    record_game(
        &mut db,
        "Valur",
        date(2, 1),
        &[(&anna, "skot", 6), (&anna, "mork", 4), (&birna, "mork", 1), (&gk, "varin_skot", 9)],
    );
    record_game(
        &mut db,
        "Haukar",
        date(2, 8),
        &[(&anna, "skot", 4), (&anna, "mork", 1), (&gk, "varin_skot", 14)],
    );

    let lines = db.player_game_lines(&anna).unwrap();
    assert_eq!(lines[0].opponent, "Haukar");
    let rows: Vec<_> = lines.into_iter().map(|l| l.row).collect();
    let profile = PlayerProfile::build(anna.clone(), &rows);
    assert_eq!(profile.games(), 2);
    assert_eq!(profile.aggregate.total("mork"), 5);
    assert_eq!(profile.aggregate.average("mork"), Some("2.5"));
    assert_eq!(profile.efficiency.unwrap().shot_pct.to_string(), "50.0");

    let keys = Role::Goalkeeper.counter_keys();
    let per_player = aggregate_by_player(&db.stat_rows(Role::Goalkeeper).unwrap(), &keys);
    let totals = team_totals(&per_player, &keys, db.game_count().unwrap());
    assert_eq!(totals.total("varin_skot"), 23);
    assert_eq!(totals.average("varin_skot"), Some("11.5"));
}

#[test]
fn test_removed_player_rows_stay_attributable() {
    let mut db = create_test_db();
    let anna = db.add_player("Anna", Role::FieldPlayer).unwrap();
    let game = record_game(&mut db, "FH", date(3, 1), &[(&anna, "mork", 2)]);

    db.deactivate_player(anna.id).unwrap();

    let lines = db.game_stat_lines(game.id, Role::FieldPlayer).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].player_name.as_deref(), Some("Anna"));

    // A later game no longer includes her
    let later = record_game(&mut db, "KA", date(3, 8), &[]);
    assert!(db
        .game_stat_lines(later.id, Role::FieldPlayer)
        .unwrap()
        .is_empty());
}

#[test]
fn test_delete_game_leaves_other_games() {
    let mut db = create_test_db();
    let anna = db.add_player("Anna", Role::FieldPlayer).unwrap();
    let first = record_game(&mut db, "Fram", date(4, 1), &[(&anna, "mork", 1)]);
    let second = record_game(&mut db, "ÍR", date(4, 2), &[(&anna, "mork", 2)]);

    assert!(db.delete_game(first.id).unwrap());

    let games = db.list_games().unwrap();
    assert_eq!(games, vec![second]);
    let rows = db.stat_rows(Role::FieldPlayer).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].count("mork"), 2);
}
