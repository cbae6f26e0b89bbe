//! Gameplay-tuning numerics consumed by the kernel
//!
//! The kernel reads these values at construction time and never mutates
//! them. Defaults match the development tuning used by the game servers.

use serde::Deserialize;

use crate::core::error::{GameError, Result};
use crate::core::types::{PlayerKind, Tick};

/// Numeric contract consumed by the kernel and its host
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of turns the spawn phase lasts.
    ///
    /// The spawn phase covers ticks `0..=num_spawn_phase_turns`; during it
    /// only spawn-phase-exempt executions run.
    pub num_spawn_phase_turns: Tick,

    /// Wall-clock interval between ticks, for the host's driver loop (ms).
    /// The kernel itself has no notion of real time.
    pub turn_interval_ms: u64,

    /// Number of bot players the host should add at game start.
    pub num_bots: u32,

    /// Starting troop allotment for human players.
    pub start_troops_human: u32,

    /// Starting troop allotment for bot players.
    pub start_troops_bot: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_spawn_phase_turns: 60,
            turn_interval_ms: 100,
            num_bots: 250,
            start_troops_human: 5000,
            start_troops_bot: 5000,
        }
    }
}

impl GameConfig {
    /// Starting troop allotment for a player of the given kind
    pub fn start_troops(&self, kind: PlayerKind) -> u32 {
        match kind {
            PlayerKind::Human => self.start_troops_human,
            PlayerKind::Bot => self.start_troops_bot,
        }
    }

    /// Parse a config from TOML. Missing keys fall back to defaults,
    /// unknown keys are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GameError::InvalidOperation(format!("failed to parse config: {e}")))
    }
}
