//! Component kinds and their column storage.
//!
//! Each component kind lives in its own [`ComponentColumn`]: a dense array of
//! values plus a sparse table from entity index to dense slot. The engine
//! keeps one column per registered kind, so lookups never go through a
//! per-component vtable.

use std::any::Any;

use crate::entity::EntityId;
use crate::pool::{ComponentPool, PoolStats};

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A fixed-shape record of entity state.
///
/// `Default` is the state a pooled component is reset to. `copy_from`
/// overwrites every field with those of another component of the same kind;
/// the engine uses it when templating one entity from another.
pub trait Component: Default + Clone + Send + Sync + 'static {
    /// Human-readable kind name, used in logs and diagnostics.
    const NAME: &'static str;

    /// Overwrite `self` with the contents of `other`.
    fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Return to the default state before being pooled.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// ComponentColumn
// ---------------------------------------------------------------------------

/// Storage for every component of kind `K`, plus its pool.
#[derive(Debug)]
pub struct ComponentColumn<K> {
    /// Entity index -> dense slot.
    sparse: Vec<Option<u32>>,
    dense: Vec<K>,
    /// Owner of each dense slot.
    owners: Vec<EntityId>,
    pool: ComponentPool<K>,
}

impl<K: Component> ComponentColumn<K> {
    /// Create an empty column whose pool reserves `pool_initial` values and
    /// retains at most `pool_max`.
    pub fn new(pool_initial: usize, pool_max: usize) -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
            pool: ComponentPool::new(pool_initial, pool_max),
        }
    }

    fn slot(&self, entity: EntityId) -> Option<usize> {
        let slot = (*self.sparse.get(entity.index() as usize)?)? as usize;
        (self.owners[slot] == entity).then_some(slot)
    }

    /// Store `value` for `entity`.
    ///
    /// If the entity already has a component of this kind, the old value is
    /// replaced and released to the pool. Returns `true` on replacement.
    pub fn insert(&mut self, entity: EntityId, value: K) -> bool {
        if let Some(slot) = self.slot(entity) {
            let old = std::mem::replace(&mut self.dense[slot], value);
            self.pool.release(old);
            return true;
        }
        let idx = entity.index() as usize;
        if idx >= self.sparse.len() {
            self.sparse.resize(idx + 1, None);
        }
        self.sparse[idx] = Some(self.dense.len() as u32);
        self.dense.push(value);
        self.owners.push(entity);
        false
    }

    /// Remove and return the component of `entity`, if any.
    pub fn take(&mut self, entity: EntityId) -> Option<K> {
        let slot = self.slot(entity)?;
        self.sparse[entity.index() as usize] = None;
        self.owners.swap_remove(slot);
        let value = self.dense.swap_remove(slot);
        if let Some(&moved) = self.owners.get(slot) {
            self.sparse[moved.index() as usize] = Some(slot as u32);
        }
        Some(value)
    }

    /// Borrow the component of `entity`.
    pub fn get(&self, entity: EntityId) -> Option<&K> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    /// Mutably borrow the component of `entity`.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut K> {
        self.slot(entity).map(move |slot| &mut self.dense[slot])
    }

    /// Take a component from this kind's pool.
    pub fn acquire(&mut self) -> K {
        self.pool.acquire()
    }

    /// Iterate `(entity, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &K)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    /// Iterate `(entity, component)` pairs mutably in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut K)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }

    /// Number of entities that carry this component.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether no entity carries this component.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ErasedColumn
// ---------------------------------------------------------------------------

/// The kind-independent operations the engine needs on every column.
pub(crate) trait ErasedColumn: Any + Send + Sync {
    fn name(&self) -> &'static str;
    fn contains(&self, entity: EntityId) -> bool;
    /// Detach the entity's component and release it to the pool.
    fn release(&mut self, entity: EntityId) -> bool;
    /// Give `dst` a pooled copy of `src`'s component, if `src` has one.
    fn duplicate(&mut self, src: EntityId, dst: EntityId) -> bool;
    fn pool_stats(&self) -> PoolStats;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: Component> ErasedColumn for ComponentColumn<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.slot(entity).is_some()
    }

    fn release(&mut self, entity: EntityId) -> bool {
        match self.take(entity) {
            Some(value) => {
                self.pool.release(value);
                true
            }
            None => false,
        }
    }

    fn duplicate(&mut self, src: EntityId, dst: EntityId) -> bool {
        let Some(slot) = self.slot(src) else {
            return false;
        };
        let mut copy = self.pool.acquire();
        copy.copy_from(&self.dense[slot]);
        self.insert(dst, copy);
        true
    }

    fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
