//! Player role types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handball player roles.
///
/// The role decides which counter catalogue applies to a player, which
/// stats table their rows live in, and whether efficiency metrics exist
/// for them (field players only).
///
/// # Examples
///
/// ```rust
/// use handball_stats::Role;
///
/// let role = Role::from_is_goalkeeper(true);
/// assert_eq!(role, Role::Goalkeeper);
/// assert_eq!(role.to_string(), "Goalkeeper");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Court player (shots, goals, assists, turnovers, ...)
    #[value(alias = "field")]
    FieldPlayer,
    /// Goalkeeper (saves, half splits, passes)
    #[value(alias = "gk")]
    Goalkeeper,
}

impl Role {
    /// Map the boolean role flag stored with each player.
    pub fn from_is_goalkeeper(is_goalkeeper: bool) -> Self {
        if is_goalkeeper {
            Role::Goalkeeper
        } else {
            Role::FieldPlayer
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Role::Goalkeeper)
    }

    /// Icelandic display name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Role::FieldPlayer => "Útileikmaður",
            Role::Goalkeeper => "Markvörður",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::FieldPlayer => "Field player",
            Role::Goalkeeper => "Goalkeeper",
        };
        write!(f, "{}", s)
    }
}
