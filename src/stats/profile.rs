//! A player's aggregate view: totals, averages and efficiency.

use serde::Serialize;

use super::{
    aggregate::{aggregate, Aggregate, StatRow},
    efficiency::{efficiency, Efficiency},
};
use crate::{storage::Player, Role};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player: Player,
    pub aggregate: Aggregate,
    /// Present for field players only.
    pub efficiency: Option<Efficiency>,
}

impl PlayerProfile {
    /// Aggregate `rows` over the player's role catalogue.
    pub fn build(player: Player, rows: &[StatRow]) -> Self {
        let keys = player.role.counter_keys();
        let aggregate = aggregate(rows, &keys);
        let efficiency = match player.role {
            Role::FieldPlayer => Some(efficiency(&aggregate.totals, aggregate.games)),
            Role::Goalkeeper => None,
        };
        Self {
            player,
            aggregate,
            efficiency,
        }
    }

    pub fn role(&self) -> Role {
        self.player.role
    }

    pub fn games(&self) -> u32 {
        self.aggregate.games
    }
}
