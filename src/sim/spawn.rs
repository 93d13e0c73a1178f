//! Spawn slot pool
//!
//! A fixed row of positions above the field. Each slot hosts at most one live
//! enemy; the enemy hands its slot back when it is removed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index into the pool's slot list
pub type SlotId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPool {
    slots: Vec<Vec2>,
    occupied: Vec<bool>,
}

impl SpawnPool {
    pub fn new(slots: Vec<Vec2>) -> Self {
        let occupied = vec![false; slots.len()];
        Self { slots, occupied }
    }

    /// Claim a uniformly random free slot, or `None` when all are taken
    pub fn acquire<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(SlotId, Vec2)> {
        let free: Vec<SlotId> = (0..self.slots.len())
            .filter(|&i| !self.occupied[i])
            .collect();
        if free.is_empty() {
            return None;
        }
        let slot = free[rng.random_range(0..free.len())];
        self.occupied[slot] = true;
        Some((slot, self.slots[slot]))
    }

    /// Return a slot to the free set. Releasing a free or unknown slot is a no-op.
    pub fn release(&mut self, slot: SlotId) {
        if let Some(taken) = self.occupied.get_mut(slot) {
            *taken = false;
        }
    }

    /// Free every slot
    pub fn release_all(&mut self) {
        self.occupied.fill(false);
    }

    pub fn is_occupied(&self, slot: SlotId) -> bool {
        self.occupied.get(slot).copied().unwrap_or(false)
    }

    pub fn position(&self, slot: SlotId) -> Option<Vec2> {
        self.slots.get(slot).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    pub fn free_count(&self) -> usize {
        self.slots.len() - self.occupied_count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
