//! Monotonic tick counter and spawn-phase predicate

use crate::core::types::Tick;

/// Simulation clock: starts at 0, advances by exactly 1 per cycle, never
/// resets.
#[derive(Debug, Clone)]
pub struct GameClock {
    ticks: Tick,
    spawn_phase_turns: Tick,
}

impl GameClock {
    pub fn new(spawn_phase_turns: Tick) -> Self {
        Self {
            ticks: 0,
            spawn_phase_turns,
        }
    }

    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    /// Spawn phase covers ticks `0..=spawn_phase_turns` (inclusive)
    pub fn in_spawn_phase(&self) -> bool {
        self.ticks <= self.spawn_phase_turns
    }

    pub(crate) fn advance(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_phase_boundary_is_inclusive() {
        let mut clock = GameClock::new(2);
        assert_eq!(clock.ticks(), 0);
        assert!(clock.in_spawn_phase());
        clock.advance();
        clock.advance();
        assert_eq!(clock.ticks(), 2);
        assert!(clock.in_spawn_phase());
        clock.advance();
        assert!(!clock.in_spawn_phase());
    }

    #[test]
    fn test_zero_length_spawn_phase_covers_tick_zero() {
        let mut clock = GameClock::new(0);
        assert!(clock.in_spawn_phase());
        clock.advance();
        assert!(!clock.in_spawn_phase());
    }
}
