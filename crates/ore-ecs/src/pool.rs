//! Component pooling.
//!
//! Every component kind gets a [`ComponentPool`] that keeps released values
//! around so that attaching a component to a new entity reuses an existing
//! allocation instead of building a fresh one. Pools are bounded: values
//! released while the pool is full are simply dropped.

use serde::{Deserialize, Serialize};

use crate::component::Component;

// ---------------------------------------------------------------------------
// PoolConfig
// ---------------------------------------------------------------------------

/// Reserved capacities for entities, and initial and maximum sizes for the
/// component pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Entity slots reserved up front.
    pub entity_pool_initial: usize,
    /// Capacity reserved in each component pool.
    pub component_pool_initial: usize,
    /// Released components kept per kind.
    pub component_pool_max: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            entity_pool_initial: 2000,
            component_pool_initial: 2000,
            component_pool_max: 2000,
        }
    }
}

impl PoolConfig {
    /// A configuration with the same size everywhere.
    pub fn uniform(size: usize) -> Self {
        Self {
            entity_pool_initial: size,
            component_pool_initial: size,
            component_pool_max: size,
        }
    }
}

// ---------------------------------------------------------------------------
// PoolStats
// ---------------------------------------------------------------------------

/// Counters for one component pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Components handed out from the pool.
    pub hits: usize,
    /// Components built from scratch because the pool was empty.
    pub misses: usize,
    /// Components currently waiting in the pool.
    pub pooled: usize,
    /// Components dropped on release because the pool was full.
    pub discarded: usize,
}

impl PoolStats {
    /// Percentage of acquisitions served from the pool.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentPool
// ---------------------------------------------------------------------------

/// A bounded free list of reset component values of one kind.
#[derive(Debug)]
pub struct ComponentPool<K> {
    free: Vec<K>,
    max: usize,
    stats: PoolStats,
}

impl<K: Component> ComponentPool<K> {
    /// Create a pool reserving `initial` slots and retaining at most `max`.
    pub fn new(initial: usize, max: usize) -> Self {
        Self {
            free: Vec::with_capacity(initial.min(max)),
            max,
            stats: PoolStats::default(),
        }
    }

    /// Take a component out of the pool, or build a default one.
    ///
    /// Pooled values were reset when they were released, so the caller
    /// always receives a component in its default state.
    pub fn acquire(&mut self) -> K {
        match self.free.pop() {
            Some(component) => {
                self.stats.hits += 1;
                self.stats.pooled = self.free.len();
                component
            }
            None => {
                self.stats.misses += 1;
                K::default()
            }
        }
    }

    /// Reset `component` and keep it for a later [`acquire`](Self::acquire).
    pub fn release(&mut self, mut component: K) {
        if self.free.len() >= self.max {
            self.stats.discarded += 1;
            return;
        }
        component.reset();
        self.free.push(component);
        self.stats.pooled = self.free.len();
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Number of values waiting in the pool.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Whether the pool currently holds no values.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
