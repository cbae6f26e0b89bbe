//! Kernel simulation driver: bots spreading over a small map

use std::time::Instant;

use dominion::core::config::GameConfig;
use dominion::core::types::{Cell, PlayerId, PlayerKind, Tick};
use dominion::events::EventLog;
use dominion::game::{Execution, Game, PlayerInfo};
use dominion::spatial::TerrainMap;

const MAP_SIZE: u32 = 64;
const BOT_COUNT: u32 = 8;
const TICK_COUNT: u64 = 300;

/// Claims a starting tile, then conquers one adjacent unowned land tile
/// per tick until nothing reachable is left.
struct SpreadExecution {
    player: PlayerId,
    start: Cell,
    active: bool,
}

impl Execution for SpreadExecution {
    fn is_active(&self) -> bool {
        self.active
    }

    fn init(&mut self, game: &mut Game, _tick: Tick) {
        if game.conquer(self.player, self.start).is_err() {
            self.active = false;
        }
    }

    fn tick(&mut self, game: &mut Game, _tick: Tick) {
        let mut frontier: Vec<Cell> = match game.player(self.player) {
            Ok(player) => player.border_tiles().collect(),
            Err(_) => {
                self.active = false;
                return;
            }
        };
        frontier.sort();
        for cell in frontier {
            for neighbor in game.grid().neighbors(cell) {
                let Ok(tile) = game.tile(neighbor) else {
                    continue;
                };
                if !tile.has_owner() && !tile.is_water() {
                    let _ = game.conquer(self.player, neighbor);
                    return;
                }
            }
        }
        // boxed in: no unowned land adjacent to any border tile
        self.active = false;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = GameConfig {
        num_spawn_phase_turns: 5,
        num_bots: BOT_COUNT,
        ..GameConfig::default()
    };
    let log = EventLog::new();
    let terrain = TerrainMap::all_land(MAP_SIZE, MAP_SIZE);
    let mut game = Game::new(&terrain, Box::new(log.clone()), config);

    println!("Starting Dominion kernel simulation");
    println!("===================================");
    println!("Map: {}x{} tiles", game.width(), game.height());
    println!("Bots: {BOT_COUNT}, ticks: {TICK_COUNT}");
    println!();

    let troops = game.config().start_troops(PlayerKind::Bot);
    for i in 0..BOT_COUNT {
        let id = game.add_player(PlayerInfo::new(format!("Bot {i}"), PlayerKind::Bot), troops);
        // scatter starting positions along the diagonal
        let offset = (i * MAP_SIZE / BOT_COUNT) as i32;
        game.add_execution(Box::new(SpreadExecution {
            player: id,
            start: Cell::new(offset, offset),
            active: true,
        }));
    }

    let start = Instant::now();
    for _ in 0..TICK_COUNT {
        game.execute_next_tick();
    }
    let elapsed = start.elapsed();

    println!("Ran {} ticks in {:.2}ms", game.ticks(), elapsed.as_secs_f64() * 1000.0);
    println!("Events emitted: {}", log.len());
    println!("State digest: {:#018x}", game.state_digest());
    println!();
    println!("--- Player Summary ---");
    for player in game.players() {
        println!(
            "{}: {} tiles ({} border)",
            player.name(),
            player.num_tiles(),
            player.num_border_tiles()
        );
    }
}
