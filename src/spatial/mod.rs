pub mod grid;
pub mod terrain;

pub use grid::{SpatialGrid, Tile};
pub use terrain::TerrainMap;
