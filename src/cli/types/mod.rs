//! Type-safe wrappers and enums for handball stats data.

pub mod ids;
pub mod role;

pub use ids::{GameId, PlayerId};
pub use role::Role;
