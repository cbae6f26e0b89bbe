//! Fixed-size tile grid with bounds checking and neighbor queries

use crate::core::error::{GameError, Result};
use crate::core::types::{Cell, Owner, Terrain};
use crate::spatial::terrain::TerrainMap;

/// A single grid position's game state.
///
/// Tiles are created once at grid construction and never destroyed; only
/// the owner and border flag mutate over the game's lifetime.
#[derive(Debug, Clone)]
pub struct Tile {
    cell: Cell,
    terrain: Terrain,
    owner: Owner,
    is_border: bool,
}

impl Tile {
    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn has_owner(&self) -> bool {
        self.owner.is_player()
    }

    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    /// True iff the tile is owned and some orthogonal neighbor has a
    /// different owner (maintained incrementally by the kernel)
    pub fn is_border(&self) -> bool {
        self.is_border
    }

    pub(crate) fn set_owner(&mut self, owner: Owner) {
        self.owner = owner;
    }

    pub(crate) fn set_border(&mut self, border: bool) {
        self.is_border = border;
    }
}

/// Fixed-size 2D tile array, flat `Vec` indexed `y * width + x`
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl SpatialGrid {
    /// Build the grid from a terrain map; every tile starts unowned
    pub fn new(terrain: &TerrainMap) -> Self {
        let width = terrain.width();
        let height = terrain.height();
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let cell = Cell::new(x, y);
                tiles.push(Tile {
                    cell,
                    // in-bounds by construction
                    terrain: terrain.terrain(cell).unwrap_or(Terrain::Water),
                    owner: Owner::TerraNullius,
                    is_border: false,
                });
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    /// Tile at `cell`. Repeated calls for the same in-bounds cell return
    /// the same tile identity for the grid's lifetime.
    pub fn tile(&self, cell: Cell) -> Result<&Tile> {
        if !self.in_bounds(cell) {
            return Err(GameError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        Ok(&self.tiles[self.index(cell)])
    }

    pub(crate) fn tile_mut(&mut self, cell: Cell) -> Result<&mut Tile> {
        if !self.in_bounds(cell) {
            return Err(GameError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(cell);
        Ok(&mut self.tiles[idx])
    }

    /// Up-to-4 orthogonal neighbors, cells off the grid edge omitted
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut ns = Vec::with_capacity(4);
        for candidate in [
            Cell::new(cell.x, cell.y - 1),
            Cell::new(cell.x, cell.y + 1),
            Cell::new(cell.x - 1, cell.y),
            Cell::new(cell.x + 1, cell.y),
        ] {
            if self.in_bounds(candidate) {
                ns.push(candidate);
            }
        }
        ns
    }

    /// Up-to-8 neighbors including diagonals, same edge-omission rule
    pub fn neighbors_with_diag(&self, cell: Cell) -> Vec<Cell> {
        let mut ns = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = Cell::new(cell.x + dx, cell.y + dy);
                if self.in_bounds(candidate) {
                    ns.push(candidate);
                }
            }
        }
        ns
    }

    /// True iff the tile at `cell` is owned and at least one orthogonal
    /// neighbor has a different owner (unowned counts as different)
    pub fn is_border(&self, cell: Cell) -> bool {
        let Ok(tile) = self.tile(cell) else {
            return false;
        };
        if !tile.has_owner() {
            return false;
        }
        self.neighbors(cell)
            .into_iter()
            .any(|n| self.tiles[self.index(n)].owner() != tile.owner())
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
