//! Entity identifiers and pooled allocation.
//!
//! An [`EntityId`] is a 64-bit handle that packs a *generation* counter in the
//! high 32 bits and an *index* in the low 32 bits. The generation is bumped
//! every time an index is recycled, so a handle to a destroyed entity is
//! detected as stale even after its index has been handed out again.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// A generational entity identifier.
///
/// Layout: `[generation: u32 | index: u32]`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Construct an `EntityId` from an index and generation.
    #[inline]
    pub fn new(index: u32, generation: u32) -> Self {
        Self((generation as u64) << 32 | index as u64)
    }

    /// The index portion (low 32 bits).
    #[inline]
    pub fn index(self) -> u32 {
        self.0 as u32
    }

    /// The generation portion (high 32 bits).
    #[inline]
    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

// ---------------------------------------------------------------------------
// EntityAllocator
// ---------------------------------------------------------------------------

/// Allocates and recycles [`EntityId`]s with generational tracking.
///
/// Freed indices wait in a FIFO queue so that reuse is spread across slots.
/// Every freed index is reused, so the slot count never exceeds the peak
/// number of live entities.
#[derive(Debug)]
pub struct EntityAllocator {
    /// Current generation for each index slot.
    generations: Vec<u32>,
    /// Whether the slot is currently alive.
    alive: Vec<bool>,
    /// Recyclable indices (FIFO).
    free_indices: VecDeque<u32>,
    alive_count: usize,
}

impl EntityAllocator {
    /// Create an allocator with no reserved capacity.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an allocator that reserves room for `initial` entities.
    pub fn with_capacity(initial: usize) -> Self {
        Self {
            generations: Vec::with_capacity(initial),
            alive: Vec::with_capacity(initial),
            free_indices: VecDeque::with_capacity(initial),
            alive_count: 0,
        }
    }

    /// Allocate a fresh [`EntityId`].
    ///
    /// A recycled index is reused with its already-bumped generation when one
    /// is available; otherwise a brand-new index is created.
    pub fn allocate(&mut self) -> EntityId {
        self.alive_count += 1;
        if let Some(index) = self.free_indices.pop_front() {
            self.alive[index as usize] = true;
            EntityId::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            EntityId::new(index, 0)
        }
    }

    /// Free an entity, bumping the generation of its index so that any
    /// outstanding handles become stale.
    ///
    /// Returns `false` if the id was already dead or stale.
    pub fn deallocate(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index() as usize;
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.alive_count -= 1;
        self.free_indices.push_back(id.index());
        true
    }

    /// Returns `true` if `id` refers to a currently alive entity whose
    /// generation matches the allocator's current generation for that index.
    pub fn is_alive(&self, id: EntityId) -> bool {
        let idx = id.index() as usize;
        if idx >= self.generations.len() {
            return false;
        }
        self.alive[idx] && self.generations[idx] == id.generation()
    }

    /// Total number of currently alive entities.
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Number of freed indices waiting to be reused.
    pub fn free_count(&self) -> usize {
        self.free_indices.len()
    }

    /// Iterate over every alive entity in index order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| EntityId::new(idx as u32, self.generations[idx]))
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
