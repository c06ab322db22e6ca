//! Head-to-head comparison of two players.

use serde::Serialize;

use super::{
    catalogue::{CounterDef, EFFICIENCY_STATS},
    profile::PlayerProfile,
};
use crate::Role;

/// Counters to show side by side for players of roles `a` and `b`.
///
/// Same role: that role's catalogue. Mixed roles: `a`'s catalogue followed
/// by `b`'s counters not already listed, in `b`'s order.
pub fn comparison_counters(a: Role, b: Role) -> Vec<CounterDef> {
    let mut counters = a.catalogue().to_vec();
    if a == b {
        return counters;
    }
    for def in b.catalogue() {
        if !counters.iter().any(|c| c.key == def.key) {
            counters.push(*def);
        }
    }
    counters
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    A,
    B,
    Tie,
}

impl Winner {
    pub fn decide(a: f64, b: f64) -> Self {
        if a > b {
            Winner::A
        } else if b > a {
            Winner::B
        } else {
            Winner::Tie
        }
    }
}

/// One counter row; `None` when the counter is not in that player's catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterComparison {
    pub counter: CounterDef,
    pub a_total: Option<u32>,
    pub b_total: Option<u32>,
    pub a_average: Option<String>,
    pub b_average: Option<String>,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub metric: CounterDef,
    pub a_value: String,
    pub b_value: String,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub counters: Vec<CounterComparison>,
    /// Empty unless both players have efficiency metrics.
    pub efficiency: Vec<MetricComparison>,
}

fn counter_side(profile: &PlayerProfile, key: &str) -> (Option<u32>, Option<String>) {
    match profile.aggregate.totals.get(key) {
        Some(&total) => (
            Some(total),
            profile.aggregate.average(key).map(str::to_string),
        ),
        None => (None, None),
    }
}

pub fn compare_profiles(a: &PlayerProfile, b: &PlayerProfile) -> Comparison {
    let counters = comparison_counters(a.role(), b.role())
        .into_iter()
        .map(|counter| {
            let (a_total, a_average) = counter_side(a, counter.key);
            let (b_total, b_average) = counter_side(b, counter.key);
            let winner = Winner::decide(
                f64::from(a_total.unwrap_or(0)),
                f64::from(b_total.unwrap_or(0)),
            );
            CounterComparison {
                counter,
                a_total,
                b_total,
                a_average,
                b_average,
                winner,
            }
        })
        .collect();

    let efficiency = match (&a.efficiency, &b.efficiency) {
        (Some(ea), Some(eb)) => EFFICIENCY_STATS
            .iter()
            .filter_map(|metric| {
                Some(MetricComparison {
                    metric: *metric,
                    a_value: ea.display_value(metric.key)?,
                    b_value: eb.display_value(metric.key)?,
                    winner: Winner::decide(ea.comparable(metric.key)?, eb.comparable(metric.key)?),
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    Comparison {
        counters,
        efficiency,
    }
}
