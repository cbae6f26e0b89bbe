//! Static terrain input consumed once at kernel construction

use crate::core::error::{GameError, Result};
use crate::core::types::{Cell, Terrain};

/// Immutable per-cell terrain classification for a map.
///
/// Produced by the map loader/generator (an external collaborator); the
/// kernel only reads it while building its grid.
#[derive(Debug, Clone)]
pub struct TerrainMap {
    width: u32,
    height: u32,
    cells: Vec<Terrain>,
}

impl TerrainMap {
    /// Build from row-major terrain data (`cells[y * width + x]`)
    pub fn new(width: u32, height: u32, cells: Vec<Terrain>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GameError::InvalidOperation(format!(
                "terrain data has {} cells, expected {expected} for a {width}x{height} map",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// All-land map, mostly useful for tests and demos
    pub fn all_land(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Terrain::Land; width as usize * height as usize],
        }
    }

    /// Parse an ASCII map: `.` is land, `~` is water. Rows must have equal
    /// length.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            if row.len() as u32 != width {
                return Err(GameError::InvalidOperation(format!(
                    "ragged terrain row: expected width {width}, got {}",
                    row.len()
                )));
            }
            for ch in row.chars() {
                match ch {
                    '.' => cells.push(Terrain::Land),
                    '~' => cells.push(Terrain::Water),
                    other => {
                        return Err(GameError::InvalidOperation(format!(
                            "unknown terrain glyph {other:?}"
                        )))
                    }
                }
            }
        }
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn terrain(&self, cell: Cell) -> Result<Terrain> {
        if cell.x < 0
            || cell.y < 0
            || cell.x as u32 >= self.width
            || cell.y as u32 >= self.height
        {
            return Err(GameError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[cell.y as usize * self.width as usize + cell.x as usize])
    }

    pub fn num_land_tiles(&self) -> u32 {
        self.cells.iter().filter(|t| t.is_land()).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let map = TerrainMap::from_rows(&["..~", "..."]).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.num_land_tiles(), 5);
        assert_eq!(map.terrain(Cell::new(2, 0)).unwrap(), Terrain::Water);
        assert_eq!(map.terrain(Cell::new(2, 1)).unwrap(), Terrain::Land);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(TerrainMap::from_rows(&["..", "..."]).is_err());
    }

    #[test]
    fn test_terrain_out_of_bounds() {
        let map = TerrainMap::all_land(2, 2);
        assert!(matches!(
            map.terrain(Cell::new(2, 0)),
            Err(GameError::OutOfBounds { .. })
        ));
        assert!(matches!(
            map.terrain(Cell::new(0, -1)),
            Err(GameError::OutOfBounds { .. })
        ));
    }
}
