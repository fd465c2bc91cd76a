//! The [`Engine`] is the pooled entity/component container. It owns the entity
//! allocator, one column per registered component kind, and the systems that
//! run on every [`update`](Engine::update).

use std::any::TypeId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::component::{Component, ComponentColumn, ErasedColumn};
use crate::entity::{EntityAllocator, EntityId};
use crate::pool::{PoolConfig, PoolStats};
use crate::EcsError;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// A system advanced once per [`Engine::update`] with the elapsed time in
/// seconds.
pub type SystemFn = fn(&mut Engine, f64);

#[derive(Debug)]
struct RegisteredSystem {
    name: String,
    func: SystemFn,
}

/// Timing for the most recent [`Engine::update`].
#[derive(Debug, Clone, Default)]
pub struct UpdateDiagnostics {
    /// Wall-clock time per system, in execution order.
    pub system_times: Vec<(String, Duration)>,
    /// Total time for the update.
    pub total_time: Duration,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Arena of entities with column-per-kind component storage.
///
/// Components are created from the engine's pools with
/// [`create_component`](Self::create_component), attached with
/// [`attach`](Self::attach), and go back to the pool when detached or when
/// their entity is destroyed.
pub struct Engine {
    allocator: EntityAllocator,
    /// Columns in registration order.
    columns: Vec<Box<dyn ErasedColumn>>,
    column_index: HashMap<TypeId, usize>,
    config: PoolConfig,
    systems: Vec<RegisteredSystem>,
    last_diagnostics: UpdateDiagnostics,
}

impl Engine {
    /// Create an empty engine with the given pool sizes.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            allocator: EntityAllocator::with_capacity(config.entity_pool_initial),
            columns: Vec::new(),
            column_index: HashMap::new(),
            config,
            systems: Vec::new(),
            last_diagnostics: UpdateDiagnostics::default(),
        }
    }

    /// The pool sizes this engine was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    // -- registration -------------------------------------------------------

    /// Register component kind `K`. Registering twice is a no-op.
    pub fn register<K: Component>(&mut self) {
        let type_id = TypeId::of::<K>();
        if self.column_index.contains_key(&type_id) {
            return;
        }
        let column = ComponentColumn::<K>::new(
            self.config.component_pool_initial,
            self.config.component_pool_max,
        );
        self.column_index.insert(type_id, self.columns.len());
        self.columns.push(Box::new(column));
        tracing::debug!(component = K::NAME, "registered component kind");
    }

    /// Whether `K` has been registered.
    pub fn is_registered<K: Component>(&self) -> bool {
        self.column_index.contains_key(&TypeId::of::<K>())
    }

    /// Names of all registered kinds, in registration order.
    pub fn registered_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    fn column<K: Component>(&self) -> Option<&ComponentColumn<K>> {
        let idx = *self.column_index.get(&TypeId::of::<K>())?;
        self.columns[idx].as_any().downcast_ref()
    }

    fn column_mut<K: Component>(&mut self) -> Result<&mut ComponentColumn<K>, EcsError> {
        let idx = *self
            .column_index
            .get(&TypeId::of::<K>())
            .ok_or(EcsError::UnregisteredComponent { name: K::NAME })?;
        self.columns[idx]
            .as_any_mut()
            .downcast_mut()
            .ok_or(EcsError::UnregisteredComponent { name: K::NAME })
    }

    fn ensure_alive(&self, entity: EntityId) -> Result<(), EcsError> {
        if self.allocator.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::StaleEntity { entity })
        }
    }

    // -- entity lifecycle ---------------------------------------------------

    /// Allocate a new entity with no components.
    pub fn create_entity(&mut self) -> EntityId {
        self.allocator.allocate()
    }

    /// Destroy `entity`, releasing every attached component to its pool.
    pub fn destroy_entity(&mut self, entity: EntityId) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        for column in &mut self.columns {
            column.release(entity);
        }
        self.allocator.deallocate(entity);
        tracing::trace!(%entity, "destroyed entity");
        Ok(())
    }

    /// Whether `entity` refers to a live entity.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Iterate over live entities in index order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.allocator.iter_alive()
    }

    /// Create a new entity carrying a copy of every component of `template`.
    ///
    /// The copies come from the pools and are filled with
    /// [`Component::copy_from`].
    pub fn duplicate_entity(&mut self, template: EntityId) -> Result<EntityId, EcsError> {
        self.ensure_alive(template)?;
        let copy = self.allocator.allocate();
        for column in &mut self.columns {
            column.duplicate(template, copy);
        }
        Ok(copy)
    }

    // -- components ---------------------------------------------------------

    /// Take a component of kind `K` from its pool, reset to defaults.
    pub fn create_component<K: Component>(&mut self) -> Result<K, EcsError> {
        Ok(self.column_mut::<K>()?.acquire())
    }

    /// Attach `component` to `entity`.
    ///
    /// An entity holds at most one component per kind: attaching a kind it
    /// already has replaces the old component, which is released to the
    /// pool. Returns `true` when a component was replaced.
    pub fn attach<K: Component>(&mut self, entity: EntityId, component: K) -> Result<bool, EcsError> {
        self.ensure_alive(entity)?;
        let replaced = self.column_mut::<K>()?.insert(entity, component);
        if replaced {
            tracing::trace!(%entity, component = K::NAME, "replaced component");
        }
        Ok(replaced)
    }

    /// Detach the `K` component of `entity` and return it to the pool.
    ///
    /// Returns `false` if the entity had no such component.
    pub fn detach<K: Component>(&mut self, entity: EntityId) -> Result<bool, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self.column_mut::<K>()?.release(entity))
    }

    /// Borrow the `K` component of `entity`.
    pub fn get<K: Component>(&self, entity: EntityId) -> Option<&K> {
        self.column::<K>()?.get(entity)
    }

    /// Mutably borrow the `K` component of `entity`.
    pub fn get_mut<K: Component>(&mut self, entity: EntityId) -> Option<&mut K> {
        self.column_mut::<K>().ok()?.get_mut(entity)
    }

    /// Whether `entity` carries a `K` component.
    pub fn has<K: Component>(&self, entity: EntityId) -> bool {
        self.get::<K>(entity).is_some()
    }

    /// Iterate every `(entity, component)` pair of kind `K`.
    ///
    /// Yields nothing for an unregistered kind.
    pub fn iter<K: Component>(&self) -> impl Iterator<Item = (EntityId, &K)> {
        self.column::<K>().into_iter().flat_map(|c| c.iter())
    }

    /// Iterate every `(entity, component)` pair of kind `K` mutably.
    pub fn iter_mut<K: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut K)> {
        self.column_mut::<K>().ok().into_iter().flat_map(|c| c.iter_mut())
    }

    /// Number of components attached to `entity`.
    pub fn component_count(&self, entity: EntityId) -> usize {
        self.columns.iter().filter(|c| c.contains(entity)).count()
    }

    /// Kind names of the components attached to `entity`, in registration
    /// order.
    pub fn component_names(&self, entity: EntityId) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.contains(entity))
            .map(|c| c.name())
            .collect()
    }

    /// Pool counters for kind `K`, or `None` if it is not registered.
    pub fn pool_stats<K: Component>(&self) -> Option<PoolStats> {
        let idx = *self.column_index.get(&TypeId::of::<K>())?;
        Some(self.columns[idx].pool_stats())
    }

    // -- systems ------------------------------------------------------------

    /// Register a system to run on every update, after those already added.
    ///
    /// # Panics
    ///
    /// Panics if a system with the same name is already registered.
    pub fn add_system(&mut self, name: &str, func: SystemFn) {
        assert!(
            !self.systems.iter().any(|s| s.name == name),
            "duplicate system name: {name:?}"
        );
        self.systems.push(RegisteredSystem {
            name: name.to_owned(),
            func,
        });
    }

    /// Names of all registered systems, in execution order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name.as_str()).collect()
    }

    /// Advance every registered system by `elapsed` seconds, in registration
    /// order.
    pub fn update(&mut self, elapsed: f64) {
        let start = Instant::now();
        // Systems registered from inside a system run from the next update.
        let scheduled: Vec<SystemFn> = self.systems.iter().map(|s| s.func).collect();
        let mut system_times = Vec::with_capacity(scheduled.len());

        for (idx, func) in scheduled.into_iter().enumerate() {
            let sys_start = Instant::now();
            func(self, elapsed);
            let name = &self.systems[idx].name;
            tracing::trace!(system = %name, elapsed, "ran system");
            system_times.push((name.clone(), sys_start.elapsed()));
        }

        self.last_diagnostics = UpdateDiagnostics {
            system_times,
            total_time: start.elapsed(),
        };
    }

    /// Diagnostics from the last update.
    pub fn last_diagnostics(&self) -> &UpdateDiagnostics {
        &self.last_diagnostics
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("entities", &self.entity_count())
            .field("components", &self.registered_names())
            .field("systems", &self.system_names())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
