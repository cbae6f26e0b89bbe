//! Dominion - authoritative simulation kernel for a territorial conquest game

pub mod core;
pub mod events;
pub mod game;
pub mod spatial;
