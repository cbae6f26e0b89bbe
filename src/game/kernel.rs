//! The game kernel: owns all world state and orchestrates each tick

use ahash::AHashMap;

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::{Cell, ClientId, ExecutionId, PlayerId, Tick};
use crate::events::{EventBus, GameEvent};
use crate::game::alliance::{Alliance, AllianceRequest};
use crate::game::clock::GameClock;
use crate::game::execution::{Execution, ExecutionScheduler};
use crate::game::player::{Player, PlayerInfo};
use crate::spatial::grid::{SpatialGrid, Tile};
use crate::spatial::terrain::TerrainMap;

/// Authoritative simulation state for one game instance.
///
/// Single-threaded and tick-driven: [`execute_next_tick`] is the sole
/// mutation entry point and runs its sub-steps to completion. External
/// collaborators (executions) read kernel views and route every mutation
/// through kernel operations.
///
/// [`execute_next_tick`]: Game::execute_next_tick
pub struct Game {
    pub(crate) grid: SpatialGrid,
    num_land_tiles: u32,
    pub(crate) players: AHashMap<PlayerId, Player>,
    // registration order, for deterministic iteration of the live view
    player_order: Vec<PlayerId>,
    next_player_id: u32,
    pub(crate) alliance_requests: Vec<AllianceRequest>,
    pub(crate) alliances: Vec<Alliance>,
    pub(crate) next_request_id: u32,
    pub(crate) next_alliance_id: u32,
    scheduler: ExecutionScheduler,
    next_execution_id: u64,
    clock: GameClock,
    config: GameConfig,
    pub(crate) bus: Box<dyn EventBus>,
}

impl Game {
    pub fn new(terrain: &TerrainMap, bus: Box<dyn EventBus>, config: GameConfig) -> Self {
        Self {
            grid: SpatialGrid::new(terrain),
            num_land_tiles: terrain.num_land_tiles(),
            players: AHashMap::new(),
            player_order: Vec::new(),
            next_player_id: 1, // zero stays unassigned
            alliance_requests: Vec::new(),
            alliances: Vec::new(),
            next_request_id: 1,
            next_alliance_id: 1,
            scheduler: ExecutionScheduler::default(),
            next_execution_id: 1,
            clock: GameClock::new(config.num_spawn_phase_turns),
            config,
            bus,
        }
    }

    // --- map views ---

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn num_land_tiles(&self) -> u32 {
        self.num_land_tiles
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn tile(&self, cell: Cell) -> Result<&Tile> {
        self.grid.tile(cell)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.tiles()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // --- clock ---

    pub fn ticks(&self) -> Tick {
        self.clock.ticks()
    }

    pub fn in_spawn_phase(&self) -> bool {
        self.clock.in_spawn_phase()
    }

    // --- players ---

    /// Register a new player and emit `PlayerAdded`. Players are never
    /// removed afterwards.
    pub fn add_player(&mut self, info: PlayerInfo, troops: u32) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        self.players.insert(id, Player::new(id, info, troops));
        self.player_order.push(id);
        self.bus.emit(GameEvent::PlayerAdded { player: id });
        id
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Strict lookup: fails for unregistered ids
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(&id).ok_or(GameError::PlayerNotFound(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(&id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    /// Linear scan over all registered players; `None` when no player has
    /// the client id. Deliberately more permissive than [`player`].
    ///
    /// [`player`]: Game::player
    pub fn player_by_client_id(&self, client_id: &ClientId) -> Option<&Player> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .find(|p| p.client_id() == Some(client_id))
    }

    /// Live players only, in registration order. Dead players remain
    /// reachable via [`player`].
    ///
    /// [`player`]: Game::player
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|p| p.is_alive())
    }

    pub fn set_troops(&mut self, id: PlayerId, troops: u32) -> Result<()> {
        self.player_mut(id)?.troops = troops;
        Ok(())
    }

    pub fn add_troops(&mut self, id: PlayerId, amount: u32) -> Result<()> {
        let player = self.player_mut(id)?;
        player.troops = player.troops.saturating_add(amount);
        Ok(())
    }

    pub fn remove_troops(&mut self, id: PlayerId, amount: u32) -> Result<()> {
        let player = self.player_mut(id)?;
        player.troops = player.troops.saturating_sub(amount);
        Ok(())
    }

    // --- executions ---

    /// Queue an execution; it stays in pending-init until the spawn-phase
    /// rules let it through.
    pub fn add_execution(&mut self, exec: Box<dyn Execution>) -> ExecutionId {
        let id = ExecutionId(self.next_execution_id);
        self.next_execution_id += 1;
        self.scheduler.add(id, exec);
        id
    }

    /// Remove an execution by handle, whichever scheduler list holds it.
    /// Calls made from inside a tick take effect at the end of the cycle.
    pub fn remove_execution(&mut self, id: ExecutionId) {
        self.scheduler.remove(id);
    }

    pub fn num_pending_executions(&self) -> usize {
        self.scheduler.num_pending()
    }

    pub fn num_active_executions(&self) -> usize {
        self.scheduler.num_active()
    }

    pub fn has_execution(&self, id: ExecutionId) -> bool {
        self.scheduler.contains(id)
    }

    /// Relay a boat movement notification, carrying the prior position
    /// for observers. Boats themselves are external executions.
    pub fn fire_boat_moved(&mut self, owner: PlayerId, from: Cell, to: Cell) {
        self.bus.emit(GameEvent::BoatMoved { owner, from, to });
    }

    // --- orchestration ---

    /// Advance the simulation by one tick, in fixed order: tick eligible
    /// active executions, promote+init eligible pending ones, run the
    /// removal pass, append the promoted, advance the clock, and every
    /// 100th tick log the deterministic state digest.
    pub fn execute_next_tick(&mut self) {
        let tick = self.clock.ticks();
        let in_spawn_phase = self.clock.in_spawn_phase();

        // Detach the scheduler so executions can borrow the kernel;
        // add/remove calls they make land in the staging scheduler.
        let mut scheduler = std::mem::take(&mut self.scheduler);
        scheduler.run_cycle(self, tick, in_spawn_phase);
        let staged = std::mem::take(&mut self.scheduler);
        scheduler.absorb(staged);
        self.scheduler = scheduler;

        self.clock.advance();
        let now = self.clock.ticks();
        if now % 100 == 0 {
            let digest = self.state_digest();
            tracing::info!(tick = now, digest, "state digest");
        }
    }

    /// Deterministic digest of live-player state: a running sum seeded at
    /// 1, plus one order-independent contribution per live player.
    /// Identical operation sequences on independently constructed kernels
    /// produce identical digests; external replication layers compare
    /// these to detect desyncs.
    pub fn state_digest(&self) -> u64 {
        let mut digest: u64 = 1;
        for player in self.players() {
            digest = digest.wrapping_add(player.digest());
        }
        digest
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("ticks", &self.ticks())
            .field("players", &self.player_order.len())
            .field("alliances", &self.alliances.len())
            .finish()
    }
}
