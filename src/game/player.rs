//! Player state: identity, troops, owned-tile caches, alliance links

use ahash::AHashSet;

use crate::core::types::{AllianceId, Cell, ClientId, PlayerId, PlayerKind};

/// Static player information supplied at registration, immutable afterwards
#[derive(Debug, Clone)]
pub struct PlayerInfo {
    pub name: String,
    pub kind: PlayerKind,
    pub client_id: Option<ClientId>,
}

impl PlayerInfo {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            client_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

/// A registered player.
///
/// The tile and border sets are exact caches of grid state, kept in sync
/// by every ownership mutation. Players are never removed from the
/// registry; dead players just drop out of the live view.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    info: PlayerInfo,
    pub(crate) troops: u32,
    pub(crate) tiles: AHashSet<Cell>,
    pub(crate) border_tiles: AHashSet<Cell>,
    pub(crate) alliances: Vec<AllianceId>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, info: PlayerInfo, troops: u32) -> Self {
        Self {
            id,
            info,
            troops,
            tiles: AHashSet::new(),
            border_tiles: AHashSet::new(),
            alliances: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn info(&self) -> &PlayerInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.info.kind
    }

    pub fn is_bot(&self) -> bool {
        self.info.kind.is_bot()
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.info.client_id.as_ref()
    }

    pub fn troops(&self) -> u32 {
        self.troops
    }

    /// A player is alive while it holds territory or troops. Pre-spawn
    /// players (troops, no tiles yet) count as alive.
    pub fn is_alive(&self) -> bool {
        self.troops > 0 || !self.tiles.is_empty()
    }

    pub fn owns(&self, cell: Cell) -> bool {
        self.tiles.contains(&cell)
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.tiles.iter().copied()
    }

    pub fn num_border_tiles(&self) -> usize {
        self.border_tiles.len()
    }

    pub fn border_tiles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.border_tiles.iter().copied()
    }

    pub fn alliances(&self) -> &[AllianceId] {
        &self.alliances
    }

    /// Order-independent digest contribution for the periodic state hash.
    /// Must stay a pure function of player state.
    pub(crate) fn digest(&self) -> u64 {
        let mut h = u64::from(self.id.0).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        h = h.wrapping_add(u64::from(self.troops).wrapping_mul(0x0100_0000_01b3));
        let mut cells: u64 = 0;
        for cell in &self.tiles {
            cells = cells.wrapping_add(cell_mix(*cell));
        }
        h = h.wrapping_add(cells);
        h.wrapping_add((self.border_tiles.len() as u64).rotate_left(17))
    }
}

#[inline]
fn cell_mix(cell: Cell) -> u64 {
    let packed = ((cell.x as u32 as u64) << 32) | cell.y as u32 as u64;
    packed.wrapping_mul(0xd6e8_feb8_6659_fd93)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness() {
        let mut p = Player::new(PlayerId(1), PlayerInfo::new("A", PlayerKind::Human), 100);
        assert!(p.is_alive());
        p.troops = 0;
        assert!(!p.is_alive());
        p.tiles.insert(Cell::new(0, 0));
        assert!(p.is_alive());
    }

    #[test]
    fn test_digest_is_order_independent() {
        let mut a = Player::new(PlayerId(1), PlayerInfo::new("A", PlayerKind::Bot), 10);
        let mut b = Player::new(PlayerId(1), PlayerInfo::new("A", PlayerKind::Bot), 10);
        for cell in [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 5)] {
            a.tiles.insert(cell);
        }
        for cell in [Cell::new(2, 5), Cell::new(0, 0), Cell::new(1, 0)] {
            b.tiles.insert(cell);
        }
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_changes_with_state() {
        let a = Player::new(PlayerId(1), PlayerInfo::new("A", PlayerKind::Bot), 10);
        let b = Player::new(PlayerId(1), PlayerInfo::new("A", PlayerKind::Bot), 11);
        let c = Player::new(PlayerId(2), PlayerInfo::new("A", PlayerKind::Bot), 10);
        assert_ne!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
    }
}
