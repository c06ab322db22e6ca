//! Derived efficiency metrics for field players.
//!
//! The rating rewards goals, assists, drawn penalties and steals, and
//! penalises turnovers and offensive fouls (`rudningur_minus`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::format::to_fixed;

const SHOTS: &str = "skot";
const GOALS: &str = "mork";
const ASSISTS: &str = "stodsending";
const TURNOVERS: &str = "tapadur_bolti";
const DRAWN_PENALTIES: &str = "fiskad_viti";
const STEALS: &str = "stolinn_bolti";
const CHARGES_AGAINST: &str = "rudningur_minus";

/// A derived number that may be undefined or unbounded.
///
/// Renders as the fixed-point value, `"∞"` or `"-"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Finite { value: f64, decimals: usize },
    Infinite,
    Undefined,
}

impl Metric {
    pub fn finite(value: f64, decimals: usize) -> Self {
        Metric::Finite { value, decimals }
    }

    /// Value used when two metrics are compared side by side.
    ///
    /// Finite values compare at their displayed precision; both sentinels
    /// compare as zero.
    pub fn comparable(&self) -> f64 {
        match self {
            Metric::Finite { .. } => self.to_string().parse().unwrap_or(0.0),
            Metric::Infinite | Metric::Undefined => 0.0,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Metric::Undefined)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Finite { value, decimals } => f.write_str(&to_fixed(*value, *decimals)),
            Metric::Infinite => f.write_str("∞"),
            Metric::Undefined => f.write_str("-"),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The four efficiency numbers of a field player's aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Efficiency {
    pub shot_pct: Metric,
    pub assist_turnover: Metric,
    pub efficiency_rating: i64,
    pub efficiency_per_game: Metric,
}

impl Efficiency {
    /// Display string for a metric key, with `%` on a defined shot percentage.
    pub fn display_value(&self, key: &str) -> Option<String> {
        match key {
            "shot_pct" if self.shot_pct.is_undefined() => Some(self.shot_pct.to_string()),
            "shot_pct" => Some(format!("{}%", self.shot_pct)),
            "assist_turnover" => Some(self.assist_turnover.to_string()),
            "efficiency_rating" => Some(self.efficiency_rating.to_string()),
            "efficiency_per_game" => Some(self.efficiency_per_game.to_string()),
            _ => None,
        }
    }

    /// Comparable value for a metric key.
    pub fn comparable(&self, key: &str) -> Option<f64> {
        match key {
            "shot_pct" => Some(self.shot_pct.comparable()),
            "assist_turnover" => Some(self.assist_turnover.comparable()),
            "efficiency_rating" => Some(self.efficiency_rating as f64),
            "efficiency_per_game" => Some(self.efficiency_per_game.comparable()),
            _ => None,
        }
    }
}

/// Compute efficiency from field-player totals over `games` games.
///
/// Only meaningful for field-player aggregates; callers skip goalkeepers.
pub fn efficiency(totals: &BTreeMap<String, u32>, games: u32) -> Efficiency {
    let get = |key: &str| i64::from(totals.get(key).copied().unwrap_or(0));

    let shots = get(SHOTS);
    let goals = get(GOALS);
    let assists = get(ASSISTS);
    let turnovers = get(TURNOVERS);

    let shot_pct = if shots > 0 {
        Metric::finite(goals as f64 / shots as f64 * 100.0, 1)
    } else {
        Metric::Undefined
    };

    let assist_turnover = if turnovers > 0 {
        Metric::finite(assists as f64 / turnovers as f64, 2)
    } else if assists > 0 {
        Metric::Infinite
    } else {
        Metric::Undefined
    };

    let efficiency_rating = (goals + assists + get(DRAWN_PENALTIES) + get(STEALS))
        - (turnovers + get(CHARGES_AGAINST));

    let efficiency_per_game = if games > 0 {
        Metric::finite(efficiency_rating as f64 / f64::from(games), 1)
    } else {
        Metric::finite(0.0, 1)
    };

    Efficiency {
        shot_pct,
        assist_turnover,
        efficiency_rating,
        efficiency_per_game,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_shot_pct() {
        let eff = efficiency(&totals(&[("skot", 10), ("mork", 5)]), 2);
        assert_eq!(eff.shot_pct.to_string(), "50.0");

        let eff = efficiency(&totals(&[("skot", 3), ("mork", 1)]), 1);
        assert_eq!(eff.shot_pct.to_string(), "33.3");

        let eff = efficiency(&totals(&[("skot", 0), ("mork", 0)]), 4);
        assert_eq!(eff.shot_pct, Metric::Undefined);
        assert_eq!(eff.shot_pct.to_string(), "-");
    }

    #[test]
    fn test_assist_turnover_three_ways() {
        let eff = efficiency(&totals(&[("tapadur_bolti", 0), ("stodsending", 0)]), 1);
        assert_eq!(eff.assist_turnover.to_string(), "-");

        let eff = efficiency(&totals(&[("tapadur_bolti", 0), ("stodsending", 3)]), 1);
        assert_eq!(eff.assist_turnover, Metric::Infinite);
        assert_eq!(eff.assist_turnover.to_string(), "∞");

        let eff = efficiency(&totals(&[("tapadur_bolti", 2), ("stodsending", 3)]), 1);
        assert_eq!(eff.assist_turnover.to_string(), "1.50");

        let eff = efficiency(&totals(&[("tapadur_bolti", 3), ("stodsending", 0)]), 1);
        assert_eq!(eff.assist_turnover.to_string(), "0.00");
    }

    #[test]
    fn test_efficiency_rating() {
        let eff = efficiency(
            &totals(&[
                ("mork", 5),
                ("stodsending", 3),
                ("fiskad_viti", 1),
                ("stolinn_bolti", 2),
                ("tapadur_bolti", 4),
                ("rudningur_minus", 1),
            ]),
            3,
        );
        assert_eq!(eff.efficiency_rating, 6);
        assert_eq!(eff.efficiency_per_game.to_string(), "2.0");
    }

    #[test]
    fn test_efficiency_rating_can_be_negative() {
        let eff = efficiency(&totals(&[("tapadur_bolti", 5), ("rudningur_minus", 2)]), 4);
        assert_eq!(eff.efficiency_rating, -7);
        assert_eq!(eff.efficiency_per_game.to_string(), "-1.8");
    }

    #[test]
    fn test_per_game_with_no_games() {
        let eff = efficiency(&totals(&[("mork", 12), ("stolinn_bolti", 3)]), 0);
        assert_eq!(eff.efficiency_rating, 15);
        assert_eq!(eff.efficiency_per_game.to_string(), "0.0");
    }

    #[test]
    fn test_empty_totals() {
        let eff = efficiency(&BTreeMap::new(), 0);
        assert_eq!(eff.shot_pct, Metric::Undefined);
        assert_eq!(eff.assist_turnover, Metric::Undefined);
        assert_eq!(eff.efficiency_rating, 0);
        assert_eq!(eff.efficiency_per_game.to_string(), "0.0");
    }

    #[test]
    fn test_comparable_values() {
        assert_eq!(Metric::Infinite.comparable(), 0.0);
        assert_eq!(Metric::Undefined.comparable(), 0.0);
        assert_eq!(Metric::finite(2.0 / 3.0, 2).comparable(), 0.67);
        assert_eq!(Metric::finite(50.0, 1).comparable(), 50.0);
    }

    #[test]
    fn test_display_value_suffix() {
        let eff = efficiency(&totals(&[("skot", 4), ("mork", 3)]), 1);
        assert_eq!(eff.display_value("shot_pct").unwrap(), "75.0%");

        let eff = efficiency(&BTreeMap::new(), 1);
        assert_eq!(eff.display_value("shot_pct").unwrap(), "-");
        assert_eq!(eff.display_value("efficiency_rating").unwrap(), "0");
        assert!(eff.display_value("bogus").is_none());
    }

    #[test]
    fn test_serializes_as_display_strings() {
        let eff = efficiency(&totals(&[("stodsending", 2)]), 2);
        let json = serde_json::to_value(eff).unwrap();

        assert_eq!(json["shot_pct"], "-");
        assert_eq!(json["assist_turnover"], "∞");
        assert_eq!(json["efficiency_rating"], 2);
        assert_eq!(json["efficiency_per_game"], "1.0");
    }
}
