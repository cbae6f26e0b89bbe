//! Replaying an identical operation sequence on two independently
//! constructed kernels must produce identical state digests.

use dominion::core::config::GameConfig;
use dominion::core::types::{Cell, PlayerId, PlayerKind, Tick};
use dominion::events::NullBus;
use dominion::game::{Execution, Game, PlayerInfo};
use dominion::spatial::TerrainMap;

/// Deterministic expansion: claims a start tile, then takes the smallest
/// unowned land neighbor of its border each tick.
struct Creep {
    player: PlayerId,
    start: Cell,
}

impl Execution for Creep {
    fn is_active(&self) -> bool {
        true
    }

    fn init(&mut self, game: &mut Game, _tick: Tick) {
        let _ = game.conquer(self.player, self.start);
    }

    fn tick(&mut self, game: &mut Game, _tick: Tick) {
        let mut frontier: Vec<Cell> = match game.player(self.player) {
            Ok(p) => p.border_tiles().collect(),
            Err(_) => return,
        };
        frontier.sort();
        let mut targets: Vec<Cell> = Vec::new();
        for cell in frontier {
            for neighbor in game.grid().neighbors(cell) {
                if let Ok(tile) = game.tile(neighbor) {
                    if !tile.has_owner() && !tile.is_water() {
                        targets.push(neighbor);
                    }
                }
            }
        }
        targets.sort();
        if let Some(target) = targets.first() {
            let _ = game.conquer(self.player, *target);
        }
    }
}

fn run_scenario() -> Game {
    let config = GameConfig {
        num_spawn_phase_turns: 3,
        ..GameConfig::default()
    };
    let mut game = Game::new(&TerrainMap::all_land(16, 16), Box::new(NullBus), config);

    let a = game.add_player(PlayerInfo::new("A", PlayerKind::Human), 5000);
    let b = game.add_player(PlayerInfo::new("B", PlayerKind::Bot), 5000);
    game.add_execution(Box::new(Creep {
        player: a,
        start: Cell::new(0, 0),
    }));
    game.add_execution(Box::new(Creep {
        player: b,
        start: Cell::new(15, 15),
    }));

    let request = game.create_alliance_request(a, b).unwrap();
    game.accept_alliance_request(request).unwrap();

    for _ in 0..100 {
        game.execute_next_tick();
    }
    game
}

#[test]
fn test_empty_game_digest_is_seed() {
    let game = Game::new(
        &TerrainMap::all_land(4, 4),
        Box::new(NullBus),
        GameConfig::default(),
    );
    assert_eq!(game.state_digest(), 1);
}

#[test]
fn test_identical_replays_produce_identical_digests() {
    let first = run_scenario();
    let second = run_scenario();
    assert_eq!(first.ticks(), 100);
    assert_eq!(first.state_digest(), second.state_digest());
}

#[test]
fn test_diverged_state_produces_different_digest() {
    let mut first = run_scenario();
    let second = run_scenario();
    let a = PlayerId(1);
    first.add_troops(a, 1).unwrap();
    assert_ne!(first.state_digest(), second.state_digest());
}
