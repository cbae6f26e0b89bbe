//! Core type definitions used throughout the kernel

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Grid coordinates of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Static terrain classification of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Land,
    Water,
}

impl Terrain {
    pub fn is_land(self) -> bool {
        matches!(self, Terrain::Land)
    }

    pub fn is_water(self) -> bool {
        matches!(self, Terrain::Water)
    }
}

/// Unique identifier for players, allocated by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Opaque client identifier assigned by the lobby/transport layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Whether a player is human-controlled or a bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Bot,
}

impl PlayerKind {
    pub fn is_bot(self) -> bool {
        matches!(self, PlayerKind::Bot)
    }
}

/// Tile ownership: a specific player, or the unowned sentinel.
///
/// `TerraNullius` is never equal to any `Player(_)`, so ownership
/// comparisons can be done directly on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player(PlayerId),
    TerraNullius,
}

impl Owner {
    pub fn is_player(self) -> bool {
        matches!(self, Owner::Player(_))
    }

    pub fn player_id(self) -> Option<PlayerId> {
        match self {
            Owner::Player(id) => Some(id),
            Owner::TerraNullius => None,
        }
    }
}

/// Unique identifier for an active alliance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllianceId(pub u32);

/// Unique identifier for a pending alliance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllianceRequestId(pub u32);

/// Handle for a scheduled execution, allocated by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_equality() {
        let a = PlayerId(1);
        let b = PlayerId(1);
        let c = PlayerId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cell_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<Cell, &str> = HashMap::new();
        map.insert(Cell::new(3, 4), "hill");
        assert_eq!(map.get(&Cell::new(3, 4)), Some(&"hill"));
        assert_eq!(map.get(&Cell::new(4, 3)), None);
    }

    #[test]
    fn test_terra_nullius_distinct_from_players() {
        assert_ne!(Owner::TerraNullius, Owner::Player(PlayerId(0)));
        assert_ne!(Owner::TerraNullius, Owner::Player(PlayerId(7)));
        assert_eq!(Owner::Player(PlayerId(7)), Owner::Player(PlayerId(7)));
        assert!(Owner::TerraNullius.player_id().is_none());
        assert_eq!(Owner::Player(PlayerId(7)).player_id(), Some(PlayerId(7)));
    }

    #[test]
    fn test_cell_ordering_is_lexicographic() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 1), Cell::new(0, 0)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]
        );
    }
}
