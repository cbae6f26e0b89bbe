//! Ownership mutation and incremental border maintenance
//!
//! Border recomputation is local to the 5-tile orthogonal neighborhood of
//! the mutated tile, so conquest cost is independent of map size.

use crate::core::error::{GameError, Result};
use crate::core::types::{Cell, Owner, PlayerId};
use crate::events::GameEvent;
use crate::game::kernel::Game;

impl Game {
    /// Transfer the tile at `cell` to `owner`, detaching it from any
    /// previous owner's caches, then recompute border flags for the tile
    /// and its orthogonal neighbors and emit `TileChanged`.
    pub fn conquer(&mut self, owner: PlayerId, cell: Cell) -> Result<()> {
        if !self.players.contains_key(&owner) {
            return Err(GameError::PlayerNotFound(owner));
        }
        let previous = self.grid.tile(cell)?.owner();
        if let Owner::Player(prev) = previous {
            if let Some(player) = self.players.get_mut(&prev) {
                player.tiles.remove(&cell);
                player.border_tiles.remove(&cell);
            }
            self.grid.tile_mut(cell)?.set_border(false);
        }

        self.grid.tile_mut(cell)?.set_owner(Owner::Player(owner));
        if let Some(player) = self.players.get_mut(&owner) {
            player.tiles.insert(cell);
        }

        self.update_borders(cell);
        self.bus.emit(GameEvent::TileChanged { cell });
        Ok(())
    }

    /// Return the tile at `cell` to terra nullius. Fails for unowned
    /// tiles and for water.
    pub fn relinquish(&mut self, cell: Cell) -> Result<()> {
        let tile = self.grid.tile(cell)?;
        let previous = match tile.owner() {
            Owner::Player(id) => id,
            Owner::TerraNullius => {
                return Err(GameError::InvalidOperation(format!(
                    "cannot relinquish unowned tile at {cell}"
                )))
            }
        };
        if tile.is_water() {
            return Err(GameError::InvalidOperation(format!(
                "cannot relinquish water at {cell}"
            )));
        }

        if let Some(player) = self.players.get_mut(&previous) {
            player.tiles.remove(&cell);
            player.border_tiles.remove(&cell);
        }
        let tile = self.grid.tile_mut(cell)?;
        tile.set_border(false);
        tile.set_owner(Owner::TerraNullius);

        self.update_borders(cell);
        self.bus.emit(GameEvent::TileChanged { cell });
        Ok(())
    }

    /// Recompute border flags for `cell` and its orthogonal neighbors.
    /// Unowned tiles are never borders; owned tiles get their flag and
    /// their owner's border-set membership synced to the grid predicate.
    fn update_borders(&mut self, cell: Cell) {
        let mut affected = self.grid.neighbors(cell);
        affected.insert(0, cell);

        for c in affected {
            let Ok(tile) = self.grid.tile(c) else {
                continue;
            };
            match tile.owner() {
                Owner::TerraNullius => {
                    if let Ok(tile) = self.grid.tile_mut(c) {
                        tile.set_border(false);
                    }
                }
                Owner::Player(owner) => {
                    let border = self.grid.is_border(c);
                    if let Ok(tile) = self.grid.tile_mut(c) {
                        tile.set_border(border);
                    }
                    if let Some(player) = self.players.get_mut(&owner) {
                        if border {
                            player.border_tiles.insert(c);
                        } else {
                            player.border_tiles.remove(&c);
                        }
                    }
                }
            }
        }
    }
}
