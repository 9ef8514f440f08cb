//! Request handling on top of the store and the scoring rules.

pub mod flag;
pub mod scoreboard;
