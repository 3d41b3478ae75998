//! Effects scheduled for a later tick.
//!
//! Every entry remembers the epoch it was queued in. The simulation bumps its
//! epoch whenever play stops, so anything queued during a previous run is
//! dropped instead of mutating the new run.

use bevy::prelude::*;

use crate::sim::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredEffect {
    /// Blast damage from a destroyed barrel.
    Detonate { source: EntityId, origin: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    due: f32,
    epoch: u64,
    effect: DeferredEffect,
}

#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: Vec<Pending>,
}

impl DeferredQueue {
    pub fn push(&mut self, due: f32, epoch: u64, effect: DeferredEffect) {
        self.pending.push(Pending { due, epoch, effect });
    }

    /// Remove and return effects due at `now` for `epoch`, in queue order.
    /// Due entries from other epochs are discarded.
    pub fn take_due(&mut self, now: f32, epoch: u64) -> Vec<DeferredEffect> {
        let mut ready = Vec::new();
        self.pending.retain(|p| {
            if p.epoch != epoch {
                return false;
            }
            if p.due <= now {
                ready.push(p.effect);
                return false;
            }
            true
        });
        ready
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
