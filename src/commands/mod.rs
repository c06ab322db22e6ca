//! Command implementations for the handball stats CLI

pub mod common;
pub mod compare;
pub mod games;
pub mod pin;
pub mod players;
pub mod session;
pub mod stats;
