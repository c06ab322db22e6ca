//! Property-style tests for the stat computation core

use std::collections::{BTreeMap, HashMap};

use handball_stats::{
    stats::{
        aggregate, aggregate_by_player, comparison_counters, efficiency, format::format_average,
        rank, FIELD_PLAYER_STATS, GOALKEEPER_STATS,
    },
    storage::Player,
    GameId, PlayerId, Role, StatRow,
};

fn counts(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn row(player: u64, game: u64, pairs: &[(&str, u32)]) -> StatRow {
    StatRow::new(PlayerId::new(player), GameId::new(game), counts(pairs))
}

fn player(id: u64, name: &str) -> Player {
    Player {
        id: PlayerId::new(id),
        name: name.to_string(),
        role: Role::FieldPlayer,
        active: true,
        sort_order: id as i64,
    }
}

/// Deterministic pseudo-random rows
fn sample_rows(n: u64) -> Vec<StatRow> {
    (0..n)
        .map(|i| {
            row(
                i % 4 + 1,
                i + 1,
                &[
                    ("skot", ((i * 7) % 11) as u32),
                    ("mork", ((i * 3) % 5) as u32),
                    ("stodsending", ((i * 5) % 4) as u32),
                ],
            )
        })
        .collect()
}

#[test]
fn test_games_equals_row_count() {
    let keys = Role::FieldPlayer.counter_keys();
    for n in 0..30 {
        let rows = sample_rows(n);
        assert_eq!(aggregate(&rows, &keys).games, n as u32);
    }
}

#[test]
fn test_empty_aggregate_is_zero() {
    for role in [Role::FieldPlayer, Role::Goalkeeper] {
        let keys = role.counter_keys();
        let agg = aggregate(&[], &keys);
        for key in &keys {
            assert_eq!(agg.total(key), 0);
            assert_eq!(agg.average(key), Some("0.0"));
        }
    }
}

#[test]
fn test_aggregate_is_order_independent() {
    let keys = Role::FieldPlayer.counter_keys();
    let rows = sample_rows(17);
    let expected = aggregate(&rows, &keys);

    let mut reversed = rows.clone();
    reversed.reverse();
    assert_eq!(aggregate(&reversed, &keys), expected);

    for shift in 1..rows.len() {
        let mut rotated = rows.clone();
        rotated.rotate_left(shift);
        assert_eq!(aggregate(&rotated, &keys), expected);
    }
}

#[test]
fn test_efficiency_per_game_without_games() {
    let totals = counts(&[("mork", 9), ("stodsending", 4), ("tapadur_bolti", 1)]);
    assert_eq!(efficiency(&totals, 0).efficiency_per_game.to_string(), "0.0");
}

#[test]
fn test_shot_percentage() {
    let zero = counts(&[("skot", 0), ("mork", 0)]);
    assert_eq!(efficiency(&zero, 3).shot_pct.to_string(), "-");

    let half = counts(&[("skot", 10), ("mork", 5)]);
    assert_eq!(efficiency(&half, 3).shot_pct.to_string(), "50.0");
}

#[test]
fn test_assist_turnover_ratio() {
    let none = counts(&[("tapadur_bolti", 0), ("stodsending", 0)]);
    assert_eq!(efficiency(&none, 2).assist_turnover.to_string(), "-");

    let unbounded = counts(&[("tapadur_bolti", 0), ("stodsending", 3)]);
    assert_eq!(efficiency(&unbounded, 2).assist_turnover.to_string(), "∞");

    let ratio = counts(&[("tapadur_bolti", 2), ("stodsending", 3)]);
    assert_eq!(efficiency(&ratio, 2).assist_turnover.to_string(), "1.50");
}

#[test]
fn test_efficiency_rating_example() {
    let totals = counts(&[
        ("mork", 5),
        ("stodsending", 3),
        ("fiskad_viti", 1),
        ("stolinn_bolti", 2),
        ("tapadur_bolti", 4),
        ("rudningur_minus", 1),
    ]);
    let eff = efficiency(&totals, 2);
    assert_eq!(eff.efficiency_rating, 6);
    assert_eq!(eff.efficiency_per_game.to_string(), "3.0");
}

#[test]
fn test_rank_excludes_zero_totals() {
    let rows = vec![
        row(1, 1, &[("mork", 5)]),
        row(2, 1, &[("mork", 0)]),
        row(3, 1, &[("mork", 8)]),
    ];
    let per_player = aggregate_by_player(&rows, &Role::FieldPlayer.counter_keys());
    let players: HashMap<_, _> = [player(1, "P1"), player(2, "P2"), player(3, "P3")]
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let board = rank(&per_player, "mork", &players);
    let ranked: Vec<_> = board
        .entries
        .iter()
        .map(|e| (e.player.name.as_str(), e.total))
        .collect();
    assert_eq!(ranked, vec![("P3", 8), ("P1", 5)]);
    assert_eq!(board.bar_ratio(&board.entries[1]), Some(5.0 / 8.0));
}

#[test]
fn test_comparison_counters() {
    let same = comparison_counters(Role::FieldPlayer, Role::FieldPlayer);
    assert_eq!(same, FIELD_PLAYER_STATS.to_vec());

    let mixed = comparison_counters(Role::FieldPlayer, Role::Goalkeeper);
    let mut expected = FIELD_PLAYER_STATS.to_vec();
    expected.extend(GOALKEEPER_STATS.iter().copied());
    assert_eq!(mixed, expected);
}

#[test]
fn test_average_round_trip() {
    for games in 1..=40u32 {
        for total in (0..=10_000i64).step_by(7) {
            let formatted = format_average(total, games);
            let parsed: f64 = formatted.parse().unwrap();
            assert_eq!(format_average((parsed * 10.0).round() as i64, 10), formatted);
        }
    }
}
