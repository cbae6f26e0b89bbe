//! Diplomatic alliance lifecycle: request, accept/reject, break
//!
//! Per ordered pair of players the states are: none -> pending (one
//! outstanding request) -> allied (one alliance) -> none again via reject
//! or break. Creating a request deliberately does not reject a duplicate
//! pending request or a pre-existing alliance between the same pair.

use crate::core::error::{GameError, Result};
use crate::core::types::{AllianceId, AllianceRequestId, PlayerId, Tick};
use crate::events::GameEvent;
use crate::game::kernel::Game;

/// A pending alliance request; exists only until accepted or rejected
#[derive(Debug, Clone)]
pub struct AllianceRequest {
    id: AllianceRequestId,
    requestor: PlayerId,
    recipient: PlayerId,
    created_at: Tick,
}

impl AllianceRequest {
    pub fn id(&self) -> AllianceRequestId {
        self.id
    }

    pub fn requestor(&self) -> PlayerId {
        self.requestor
    }

    pub fn recipient(&self) -> PlayerId {
        self.recipient
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }
}

/// An active alliance between two players; exists only until broken
#[derive(Debug, Clone)]
pub struct Alliance {
    id: AllianceId,
    members: (PlayerId, PlayerId),
    created_at: Tick,
}

impl Alliance {
    pub fn id(&self) -> AllianceId {
        self.id
    }

    pub fn members(&self) -> (PlayerId, PlayerId) {
        self.members
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.members.0 == player || self.members.1 == player
    }

    /// The other member, if `player` is a member at all
    pub fn other(&self, player: PlayerId) -> Option<PlayerId> {
        if self.members.0 == player {
            Some(self.members.1)
        } else if self.members.1 == player {
            Some(self.members.0)
        } else {
            None
        }
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }
}

impl Game {
    /// Append a pending request from `requestor` to `recipient` and emit
    /// `AllianceRequested`. Duplicate concurrent requests between the
    /// same pair are not rejected.
    pub fn create_alliance_request(
        &mut self,
        requestor: PlayerId,
        recipient: PlayerId,
    ) -> Result<AllianceRequestId> {
        self.player(requestor)?;
        self.player(recipient)?;
        let id = AllianceRequestId(self.next_request_id);
        self.next_request_id += 1;
        self.alliance_requests.push(AllianceRequest {
            id,
            requestor,
            recipient,
            created_at: self.ticks(),
        });
        self.bus.emit(GameEvent::AllianceRequested {
            request: id,
            requestor,
            recipient,
        });
        Ok(id)
    }

    /// Remove the pending request, create the alliance, link it into both
    /// players' alliance lists, and emit an accepting `AllianceReply`.
    pub fn accept_alliance_request(&mut self, id: AllianceRequestId) -> Result<()> {
        let request = self.take_request(id)?;
        let alliance_id = AllianceId(self.next_alliance_id);
        self.next_alliance_id += 1;
        self.alliances.push(Alliance {
            id: alliance_id,
            members: (request.requestor, request.recipient),
            created_at: self.ticks(),
        });
        if let Some(player) = self.players.get_mut(&request.requestor) {
            player.alliances.push(alliance_id);
        }
        if let Some(player) = self.players.get_mut(&request.recipient) {
            player.alliances.push(alliance_id);
        }
        tracing::debug!(
            requestor = request.requestor.0,
            recipient = request.recipient.0,
            "alliance formed"
        );
        self.bus.emit(GameEvent::AllianceReply {
            request: id,
            requestor: request.requestor,
            recipient: request.recipient,
            accepted: true,
        });
        Ok(())
    }

    /// Remove the pending request and emit a rejecting `AllianceReply`.
    pub fn reject_alliance_request(&mut self, id: AllianceRequestId) -> Result<()> {
        let request = self.take_request(id)?;
        self.bus.emit(GameEvent::AllianceReply {
            request: id,
            requestor: request.requestor,
            recipient: request.recipient,
            accepted: false,
        });
        Ok(())
    }

    /// Break the single alliance shared by `breaker` and `other`. Fails
    /// unless the intersection of their alliance lists has exactly one
    /// element.
    pub fn break_alliance(&mut self, breaker: PlayerId, other: PlayerId) -> Result<()> {
        let breaker_list = self.player(breaker)?.alliances().to_vec();
        let other_list = self.player(other)?.alliances();
        let shared: Vec<AllianceId> = breaker_list
            .iter()
            .copied()
            .filter(|id| other_list.contains(id))
            .collect();
        if shared.len() != 1 {
            return Err(GameError::InvariantViolation(format!(
                "expected exactly one alliance between {breaker:?} and {other:?}, found {}",
                shared.len()
            )));
        }
        let gone = shared[0];
        self.alliances.retain(|a| a.id != gone);
        if let Some(player) = self.players.get_mut(&breaker) {
            player.alliances.retain(|id| *id != gone);
        }
        if let Some(player) = self.players.get_mut(&other) {
            player.alliances.retain(|id| *id != gone);
        }
        tracing::debug!(breaker = breaker.0, other = other.0, "alliance broken");
        self.bus.emit(GameEvent::AllianceBroken { breaker, other });
        Ok(())
    }

    /// All pending requests, in creation order
    pub fn alliance_requests(&self) -> &[AllianceRequest] {
        &self.alliance_requests
    }

    /// All active alliances, in creation order
    pub fn alliances(&self) -> &[Alliance] {
        &self.alliances
    }

    /// Whether any active alliance joins the two players
    pub fn allied(&self, a: PlayerId, b: PlayerId) -> bool {
        self.alliances
            .iter()
            .any(|alliance| alliance.contains(a) && alliance.contains(b))
    }

    fn take_request(&mut self, id: AllianceRequestId) -> Result<AllianceRequest> {
        let pos = self
            .alliance_requests
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| {
                GameError::InvalidOperation(format!("unknown alliance request {id:?}"))
            })?;
        Ok(self.alliance_requests.remove(pos))
    }
}
