//! Per-tick execution units and their two-list scheduler

use crate::core::types::{ExecutionId, Tick};
use crate::game::kernel::Game;

/// A schedulable unit of game-logic behavior (unit movement, naval
/// transport, special effects, ...), implemented outside the kernel.
///
/// The kernel never inspects an execution's internals; it only drives this
/// capability contract, passing itself by reference so multiple kernel
/// instances cannot interfere.
pub trait Execution {
    /// Whether this execution still wants to run. Inactive executions are
    /// dropped by the scheduler's removal pass.
    fn is_active(&self) -> bool;

    /// Whether this execution is exempt from spawn-phase gating.
    fn active_during_spawn_phase(&self) -> bool {
        false
    }

    /// One-time setup, called when the execution is promoted out of the
    /// pending list.
    fn init(&mut self, game: &mut Game, tick: Tick);

    /// Per-tick step, called while the execution is active and eligible.
    fn tick(&mut self, game: &mut Game, tick: Tick);
}

struct Slot {
    id: ExecutionId,
    exec: Box<dyn Execution>,
}

/// Two insertion-ordered lists: executions awaiting their one-time init,
/// and initialized executions ticked every cycle.
///
/// An execution is in exactly one of {pending-init, active, removed} at
/// any instant.
#[derive(Default)]
pub struct ExecutionScheduler {
    pending_init: Vec<Slot>,
    active: Vec<Slot>,
    // removal requests recorded while the scheduler is detached from the
    // kernel mid-cycle; applied when the cycle's lists are merged back
    removed: Vec<ExecutionId>,
}

impl ExecutionScheduler {
    pub(crate) fn add(&mut self, id: ExecutionId, exec: Box<dyn Execution>) {
        self.pending_init.push(Slot { id, exec });
    }

    /// Remove by identity from whichever list currently holds the
    /// execution. Requests made mid-cycle take effect when the cycle ends.
    pub(crate) fn remove(&mut self, id: ExecutionId) {
        self.pending_init.retain(|slot| slot.id != id);
        self.active.retain(|slot| slot.id != id);
        self.removed.push(id);
    }

    pub fn num_pending(&self) -> usize {
        self.pending_init.len()
    }

    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    pub fn contains(&self, id: ExecutionId) -> bool {
        self.pending_init.iter().any(|slot| slot.id == id)
            || self.active.iter().any(|slot| slot.id == id)
    }

    /// One scheduler cycle, in fixed order: tick pass over the active
    /// list, promotion pass over pending-init, phase-aware removal pass,
    /// then append the newly promoted executions.
    ///
    /// `self` is detached from `game` for the duration of the cycle, so
    /// executions may freely call back into the kernel; additions land in
    /// the kernel's staging scheduler and are merged via [`absorb`].
    ///
    /// [`absorb`]: ExecutionScheduler::absorb
    pub(crate) fn run_cycle(&mut self, game: &mut Game, tick: Tick, in_spawn_phase: bool) {
        for slot in &mut self.active {
            if slot.exec.is_active() && (!in_spawn_phase || slot.exec.active_during_spawn_phase())
            {
                slot.exec.tick(game, tick);
            }
        }

        let pending = std::mem::take(&mut self.pending_init);
        let mut promoted = Vec::new();
        let mut remainder = Vec::new();
        for mut slot in pending {
            if !in_spawn_phase || slot.exec.active_during_spawn_phase() {
                slot.exec.init(game, tick);
                promoted.push(slot);
            } else {
                remainder.push(slot);
            }
        }

        // Phase-aware removal: during the spawn phase, spawn-phase-exempt
        // executions are kept even while they report inactive.
        self.active.retain(|slot| {
            if in_spawn_phase {
                slot.exec.active_during_spawn_phase() || slot.exec.is_active()
            } else {
                slot.exec.is_active()
            }
        });

        self.active.extend(promoted);
        self.pending_init = remainder;
    }

    /// Merge the kernel's staging scheduler back after a cycle: additions
    /// made by executions join pending-init, mid-cycle removal requests
    /// are applied to both lists.
    pub(crate) fn absorb(&mut self, mut staged: ExecutionScheduler) {
        self.pending_init.append(&mut staged.pending_init);
        self.active.append(&mut staged.active);
        if !staged.removed.is_empty() {
            self.pending_init
                .retain(|slot| !staged.removed.contains(&slot.id));
            self.active.retain(|slot| !staged.removed.contains(&slot.id));
        }
        self.removed.clear();
    }
}

impl std::fmt::Debug for ExecutionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionScheduler")
            .field("num_pending", &self.pending_init.len())
            .field("num_active", &self.active.len())
            .finish()
    }
}
