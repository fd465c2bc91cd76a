//! Ore ECS -- pooled entity/component arena for the Ore sandbox world.
//!
//! Entities are generational ids handed out by an [`EntityAllocator`]
//! (freed indices are pooled and reused). Components live in one dense
//! column per kind, and every column owns a bounded pool of released
//! component values so that attaching components does not churn the
//! allocator.
//!
//! # Quick Start
//!
//! ```
//! use ore_ecs::prelude::*;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Health { hp: u32 }
//!
//! impl Component for Health {
//!     const NAME: &'static str = "health";
//! }
//!
//! let mut engine = Engine::new(PoolConfig::default());
//! engine.register::<Health>();
//!
//! let entity = engine.create_entity();
//! let mut health = engine.create_component::<Health>().unwrap();
//! health.hp = 10;
//! engine.attach(entity, health).unwrap();
//!
//! assert_eq!(engine.get::<Health>(entity), Some(&Health { hp: 10 }));
//! ```
//!
//! [`EntityAllocator`]: entity::EntityAllocator

#![deny(unsafe_code)]

pub mod component;
pub mod engine;
pub mod entity;
pub mod pool;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The entity does not exist (stale generation or never allocated).
    #[error("entity {entity:?} does not exist (stale or never allocated)")]
    StaleEntity {
        entity: entity::EntityId,
    },

    /// A component kind was used before being registered with the engine.
    #[error("component kind '{name}' is not registered with the engine")]
    UnregisteredComponent {
        name: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::component::{Component, ComponentColumn};
    pub use crate::engine::{Engine, SystemFn, UpdateDiagnostics};
    pub use crate::entity::{EntityAllocator, EntityId};
    pub use crate::pool::{ComponentPool, PoolConfig, PoolStats};
    pub use crate::EcsError;
}
