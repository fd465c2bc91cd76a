//! Ore World -- tile grid, entity factories and per-frame orchestration for
//! the Ore sandbox game.
//!
//! A [`World`](world::World) owns a fixed-size grid of block tiles and a
//! pooled entity engine from [`ore_ecs`]. It is built for one
//! [`Role`](world::Role): a server world only simulates, while a client world
//! also drives a camera and a set of render collaborators each frame.
//!
//! # Quick Start
//!
//! ```
//! use ore_world::prelude::*;
//!
//! let config = WorldConfig::with_dimensions(32, 64);
//! let mut world = World::with_terrain(config, WorldRole::Server, &FillBelowSeaLevel::default())?;
//!
//! assert!(world.block_at(0, 63).is_solid());
//!
//! let generator = world.create_air_generator()?;
//! assert_eq!(
//!     world.engine().get::<AirGeneratorComponent>(generator).map(|g| g.air_output_rate),
//!     Some(100)
//! );
//! # Ok::<(), ore_world::WorldError>(())
//! ```

#![deny(unsafe_code)]

pub mod block;
pub mod components;
pub mod config;
pub mod frame;
pub mod grid;
pub mod render;
pub mod terrain;
pub mod world;

pub use ore_ecs;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by world construction and frame operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Grid(#[from] grid::GridError),

    #[error(transparent)]
    Ecs(#[from] ore_ecs::EcsError),

    #[error(transparent)]
    Asset(#[from] render::AssetError),

    /// A client-only operation was called on a server world.
    #[error("operation requires a client world")]
    NotClient,

    /// The world's render resources have already been released.
    #[error("world has been disposed")]
    Disposed,
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::block::{Block, BlockType};
    pub use crate::components::{
        AirGeneratorComponent, BlockComponent, HealthComponent, ItemComponent, SpriteComponent,
        VelocityComponent,
    };
    pub use crate::config::{ConfigError, WorldConfig};
    pub use crate::frame::{FrameConfig, FrameDiagnostics, FrameLoop};
    pub use crate::grid::{GridError, TileGrid, Vec2};
    pub use crate::render::{
        AssetError, AssetSource, Camera2D, ClientBackend, InputState, RenderBatch, Sprite,
        SpriteRenderer, TextureHandle, TileRenderer, TileView,
    };
    pub use crate::terrain::{FillBelowSeaLevel, FlatTerrain, LayeredTerrain, TerrainGenerator};
    pub use crate::world::{Role, World, WorldRole};
    pub use crate::WorldError;
    pub use ore_ecs::prelude::{EcsError, Engine, EntityId, PoolConfig, SystemFn};
}
