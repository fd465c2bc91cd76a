//! The [`World`]: tile grid, entity engine, players and, on clients, the
//! camera and render collaborators.
//!
//! A world is built once per session for a fixed [`Role`]. Servers own only
//! simulation state. Clients additionally own a [`ClientBackend`], a camera
//! and two placeholder sprites, and can [`render`](World::render).

use std::fmt;

use ore_ecs::prelude::*;

use crate::block::{Block, BlockType};
use crate::components::{
    AirGeneratorComponent, BlockComponent, HealthComponent, ItemComponent, SpriteComponent,
    VelocityComponent,
};
use crate::config::WorldConfig;
use crate::grid::{TileGrid, Vec2};
use crate::render::{Camera2D, ClientBackend, InputState, Sprite, TextureHandle, TileView};
use crate::terrain::{FlatTerrain, TerrainGenerator};
use crate::WorldError;

// ---------------------------------------------------------------------------
// Factory constants
// ---------------------------------------------------------------------------

/// Texture given to block items.
pub const BLOCK_ITEM_TEXTURE: &str = "pickaxeWooden1";
/// Edge length of a block item sprite, in pixels.
pub const BLOCK_ITEM_SIZE_PIXELS: f32 = 32.0;
/// Block type every block item is created with.
pub const BLOCK_ITEM_TYPE: BlockType = BlockType::Stone;
/// Texture given to air generators.
pub const AIR_GENERATOR_TEXTURE: &str = "airGenerator1";
/// Edge length of an air generator sprite, in tiles.
pub const AIR_GENERATOR_SIZE_BLOCKS: f32 = 4.0;
pub const AIR_GENERATOR_OUTPUT_RATE: i32 = 100;
pub const ITEM_STACK_SIZE: u32 = 800;
pub const ITEM_MAX_STACK_SIZE: u32 = 900;

/// Where the client's main player sprite starts.
const MAIN_PLAYER_START: (f32, f32) = (50.0, 50.0);
const SECOND_SPRITE_START: (f32, f32) = (90.0, 90.0);

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Whether a world is authoritative or presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Server,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Server => f.write_str("server"),
            Role::Client => f.write_str("client"),
        }
    }
}

/// The role a world is constructed for. A client brings its render
/// collaborators along.
#[derive(Debug)]
pub enum WorldRole {
    Server,
    Client(ClientBackend),
}

/// Presentation state owned by a client world.
struct ClientView {
    backend: ClientBackend,
    camera: Camera2D,
    main_player: Sprite,
    second_sprite: Sprite,
    texture: Option<TextureHandle>,
    disposed: bool,
}

impl ClientView {
    fn new(mut backend: ClientBackend, config: &WorldConfig) -> Result<Self, WorldError> {
        let mut main_player = Sprite::at(MAIN_PLAYER_START.0, MAIN_PLAYER_START.1);
        let mut second_sprite = Sprite::at(SECOND_SPRITE_START.0, SECOND_SPRITE_START.1);

        let (view_w, view_h) = config.viewport_world_size();
        let mut camera = Camera2D::new(view_w, view_h);
        camera.set_position(main_player.x, main_player.y);
        camera.update();

        let texture = match backend.assets.load_texture(&config.placeholder_texture) {
            Ok(texture) => texture,
            Err(err) => {
                backend.batch.dispose();
                return Err(err.into());
            }
        };
        main_player.set_texture(texture);
        second_sprite.set_texture(texture);

        Ok(Self {
            backend,
            camera,
            main_player,
            second_sprite,
            texture: Some(texture),
            disposed: false,
        })
    }

    /// Crosshair overlay hook; nothing is drawn yet.
    fn update_crosshair(&mut self) {}

    /// Item placement preview hook; nothing is drawn yet.
    fn update_item_placement_ghost(&mut self) {}

    /// Release the batch and placeholder texture. Returns `false` if they
    /// were already released.
    fn release(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.backend.batch.dispose();
        if let Some(texture) = self.texture.take() {
            self.backend.assets.release_texture(texture);
        }
        self.disposed = true;
        true
    }
}

enum RoleState {
    Server,
    Client(Box<ClientView>),
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Tile grid, entity engine and players of one game session.
pub struct World {
    config: WorldConfig,
    grid: TileGrid,
    engine: Engine,
    players: Vec<EntityId>,
    role: RoleState,
}

impl World {
    /// Build a world with no terrain.
    pub fn new(config: WorldConfig, role: WorldRole) -> Result<Self, WorldError> {
        Self::with_terrain(config, role, &FlatTerrain)
    }

    /// Build a world and populate its grid with `terrain`.
    ///
    /// The full grid and the pooled engine are allocated for every role; a
    /// client additionally sets up its camera, sprites and placeholder
    /// texture.
    pub fn with_terrain(
        config: WorldConfig,
        role: WorldRole,
        terrain: &dyn TerrainGenerator,
    ) -> Result<Self, WorldError> {
        config.validate()?;

        let role = match role {
            WorldRole::Server => RoleState::Server,
            WorldRole::Client(backend) => {
                RoleState::Client(Box::new(ClientView::new(backend, &config)?))
            }
        };

        let mut grid = TileGrid::new(config.columns, config.rows, config.block_size());
        let engine = Self::build_engine(&config);

        terrain.generate(&mut grid, config.sea_level);

        let world = Self {
            config,
            grid,
            engine,
            players: Vec::new(),
            role,
        };
        tracing::debug!(
            role = %world.role(),
            columns = world.grid.columns(),
            rows = world.grid.rows(),
            terrain = terrain.name(),
            "world created"
        );
        Ok(world)
    }

    fn build_engine(config: &WorldConfig) -> Engine {
        let mut engine = Engine::new(config.pools);
        engine.register::<HealthComponent>();
        engine.register::<ItemComponent>();
        engine.register::<BlockComponent>();
        engine.register::<SpriteComponent>();
        engine.register::<VelocityComponent>();
        engine.register::<AirGeneratorComponent>();
        engine
    }

    // -- role -----------------------------------------------------------------

    pub fn role(&self) -> Role {
        match self.role {
            RoleState::Server => Role::Server,
            RoleState::Client(_) => Role::Client,
        }
    }

    pub fn is_server(&self) -> bool {
        self.role() == Role::Server
    }

    pub fn is_client(&self) -> bool {
        self.role() == Role::Client
    }

    fn client(&self) -> Option<&ClientView> {
        match &self.role {
            RoleState::Client(view) => Some(view),
            RoleState::Server => None,
        }
    }

    // -- accessors ------------------------------------------------------------

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable engine access, e.g. to register systems or spawn entities.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Registered players, in registration order.
    pub fn players(&self) -> &[EntityId] {
        &self.players
    }

    /// The client camera; `None` on a server.
    pub fn camera(&self) -> Option<&Camera2D> {
        self.client().map(|c| &c.camera)
    }

    /// The sprite moved by player input; `None` on a server.
    pub fn main_player_sprite(&self) -> Option<&Sprite> {
        self.client().map(|c| &c.main_player)
    }

    /// The placeholder texture; `None` on a server or after disposal.
    pub fn placeholder_texture(&self) -> Option<TextureHandle> {
        self.client().and_then(|c| c.texture)
    }

    /// Whether client resources have been released.
    pub fn is_disposed(&self) -> bool {
        self.client().is_some_and(|c| c.disposed)
    }

    // -- tiles ----------------------------------------------------------------

    /// The block at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[track_caller]
    pub fn block_at(&self, x: i32, y: i32) -> &Block {
        self.grid.block_at(x, y)
    }

    /// The block under a world position (in world units).
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    #[track_caller]
    pub fn block_at_position(&self, pos: Vec2) -> &Block {
        self.grid.block_at_position(pos)
    }

    #[track_caller]
    pub fn is_block_solid(&self, x: i32, y: i32) -> bool {
        self.grid.is_block_solid(x, y)
    }

    /// Whether a block can be placed at `(x, y)`.
    ///
    /// Entities overlapping the tile are not taken into account.
    #[track_caller]
    pub fn can_place_block(&self, x: i32, y: i32) -> bool {
        self.grid.can_place_block(x, y)
    }

    pub fn sea_level(&self) -> u32 {
        self.config.sea_level
    }

    // -- frame ----------------------------------------------------------------

    /// Advance every engine system by `elapsed` seconds.
    pub fn update(&mut self, elapsed: f64) {
        self.engine.update(elapsed);
    }

    /// Draw one frame and apply player input.
    ///
    /// Tiles are drawn first so sprites land on top. The camera is recentred
    /// on the player after the input is applied and before the batch
    /// projection is set, so the frame never uses a stale transform.
    pub fn render(&mut self, elapsed: f64, input: &InputState) -> Result<(), WorldError> {
        let view = match &mut self.role {
            RoleState::Client(view) => &mut **view,
            RoleState::Server => return Err(WorldError::NotClient),
        };
        if view.disposed {
            return Err(WorldError::Disposed);
        }

        let tiles = TileView {
            grid: &self.grid,
            camera: &view.camera,
            player: &view.main_player,
        };
        view.backend.tile_renderer.render(&tiles, elapsed);

        let sprites = &mut view.backend.sprite_renderer;
        sprites.render_entities(&self.engine, elapsed);
        sprites.render_characters(&self.engine, elapsed);
        sprites.render_dropped_entities(&self.engine, elapsed);
        sprites.render_dropped_blocks(&self.engine, elapsed);

        view.update_crosshair();
        view.update_item_placement_ghost();

        view.main_player
            .translate_x(input.horizontal() * self.config.player_movement_speed);

        view.camera.set_position(view.main_player.x, view.main_player.y);
        view.camera.update();

        let batch = &mut view.backend.batch;
        batch.set_projection_matrix(view.camera.combined());
        batch.begin();
        batch.draw(&view.main_player);
        batch.draw(&view.second_sprite);
        batch.end();
        Ok(())
    }

    /// Scale the client camera's zoom by `factor`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not positive and finite.
    #[track_caller]
    pub fn zoom(&mut self, factor: f32) {
        assert!(
            factor > 0.0 && factor.is_finite(),
            "zoom factor must be positive and finite, got {factor}"
        );
        match &mut self.role {
            RoleState::Client(view) => {
                view.camera.zoom *= factor;
                view.camera.update();
            }
            RoleState::Server => tracing::warn!(factor, "zoom ignored on a server world"),
        }
    }

    /// Release the render batch and placeholder texture.
    ///
    /// Resources are released once; later calls do nothing. Dropping the
    /// world disposes it as well.
    pub fn dispose(&mut self) {
        if let RoleState::Client(view) = &mut self.role {
            if !view.release() {
                tracing::warn!("world already disposed");
            }
        }
    }

    // -- entities -------------------------------------------------------------

    /// Turn `entity` into a dropped block item.
    ///
    /// Attaches velocity, block (stone), sprite and item components. Kinds
    /// the entity already carries are replaced, so repeated calls leave
    /// exactly these four components.
    pub fn create_block_item(&mut self, entity: EntityId) -> Result<(), EcsError> {
        let size = BLOCK_ITEM_SIZE_PIXELS / self.config.pixels_per_meter;
        let engine = &mut self.engine;

        let velocity = engine.create_component::<VelocityComponent>()?;
        engine.attach(entity, velocity)?;

        let mut block = engine.create_component::<BlockComponent>()?;
        block.block_type = BLOCK_ITEM_TYPE;
        engine.attach(entity, block)?;

        let mut sprite = engine.create_component::<SpriteComponent>()?;
        sprite.texture.push_str(BLOCK_ITEM_TEXTURE);
        sprite.set_size(size, size);
        engine.attach(entity, sprite)?;

        let mut item = engine.create_component::<ItemComponent>()?;
        item.stack_size = ITEM_STACK_SIZE;
        item.max_stack_size = ITEM_MAX_STACK_SIZE;
        engine.attach(entity, item)?;
        Ok(())
    }

    /// Create a new air generator entity with item, sprite and air generator
    /// components.
    ///
    /// The entity is not registered anywhere else; that is up to the caller.
    pub fn create_air_generator(&mut self) -> Result<EntityId, EcsError> {
        let size = self.config.block_size() * AIR_GENERATOR_SIZE_BLOCKS;
        let engine = &mut self.engine;
        let air = engine.create_entity();

        let mut item = engine.create_component::<ItemComponent>()?;
        item.stack_size = ITEM_STACK_SIZE;
        item.max_stack_size = ITEM_MAX_STACK_SIZE;
        engine.attach(air, item)?;

        let mut sprite = engine.create_component::<SpriteComponent>()?;
        sprite.texture.push_str(AIR_GENERATOR_TEXTURE);
        sprite.set_size(size, size);
        engine.attach(air, sprite)?;

        let mut generator = engine.create_component::<AirGeneratorComponent>()?;
        generator.air_output_rate = AIR_GENERATOR_OUTPUT_RATE;
        engine.attach(air, generator)?;

        Ok(air)
    }

    /// Register `player`. Registering the same entity again adds another
    /// entry.
    pub fn add_player(&mut self, player: EntityId) {
        if self.players.contains(&player) {
            tracing::debug!(%player, "player registered more than once");
        }
        self.players.push(player);
    }
}

impl Drop for World {
    fn drop(&mut self) {
        if let RoleState::Client(view) = &mut self.role {
            view.release();
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("role", &self.role())
            .field("columns", &self.grid.columns())
            .field("rows", &self.grid.rows())
            .field("players", &self.players)
            .field("engine", &self.engine)
            .finish()
    }
}
