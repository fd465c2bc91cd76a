//! Client-side presentation seams.
//!
//! The world never talks to a graphics API. A client world is handed a
//! [`ClientBackend`] holding the collaborators it drives each frame:
//!
//! - a [`TileRenderer`] that draws the grid,
//! - a [`SpriteRenderer`] that draws entities by category,
//! - a [`RenderBatch`] for the placeholder sprites the world draws itself,
//! - an [`AssetSource`] that resolves texture paths.
//!
//! Input arrives as an [`InputState`] snapshot passed into each render call,
//! so frame logic can be exercised without a window or a GPU.

pub mod camera;
pub mod sprite;

pub use camera::Camera2D;
pub use sprite::Sprite;

use ore_ecs::engine::Engine;

use crate::grid::TileGrid;

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Opaque handle to a texture owned by an [`AssetSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Errors reported by an [`AssetSource`].
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("texture '{path}' not found")]
    NotFound { path: String },

    #[error("failed to load texture '{path}': {reason}")]
    Load { path: String, reason: String },
}

/// Loads and releases textures by file path.
pub trait AssetSource: Send {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError>;

    fn release_texture(&mut self, texture: TextureHandle);
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Directional keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub const NONE: InputState = InputState {
        left: false,
        right: false,
    };

    /// Horizontal direction: -1, 0 or 1. Both keys cancel out.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// What the tile renderer gets to look at each frame.
#[derive(Debug, Clone, Copy)]
pub struct TileView<'a> {
    pub grid: &'a TileGrid,
    pub camera: &'a Camera2D,
    pub player: &'a Sprite,
}

/// Draws the tile grid.
pub trait TileRenderer: Send {
    fn render(&mut self, view: &TileView<'_>, elapsed: f64);
}

/// Draws entities, one category per call.
pub trait SpriteRenderer: Send {
    /// Static entities such as placed devices.
    fn render_entities(&mut self, engine: &Engine, elapsed: f64);
    fn render_characters(&mut self, engine: &Engine, elapsed: f64);
    /// Items lying in the world.
    fn render_dropped_entities(&mut self, engine: &Engine, elapsed: f64);
    fn render_dropped_blocks(&mut self, engine: &Engine, elapsed: f64);
}

/// Immediate-mode sprite batch.
pub trait RenderBatch: Send {
    fn set_projection_matrix(&mut self, matrix: [f32; 16]);
    fn begin(&mut self);
    fn draw(&mut self, sprite: &Sprite);
    fn end(&mut self);
    /// Release GPU resources. Called exactly once by the owning world.
    fn dispose(&mut self);
}

/// Everything a client world needs to present itself.
pub struct ClientBackend {
    pub batch: Box<dyn RenderBatch>,
    pub tile_renderer: Box<dyn TileRenderer>,
    pub sprite_renderer: Box<dyn SpriteRenderer>,
    pub assets: Box<dyn AssetSource>,
}

impl ClientBackend {
    pub fn new(
        batch: impl RenderBatch + 'static,
        tile_renderer: impl TileRenderer + 'static,
        sprite_renderer: impl SpriteRenderer + 'static,
        assets: impl AssetSource + 'static,
    ) -> Self {
        Self {
            batch: Box::new(batch),
            tile_renderer: Box::new(tile_renderer),
            sprite_renderer: Box::new(sprite_renderer),
            assets: Box::new(assets),
        }
    }
}

impl std::fmt::Debug for ClientBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBackend").finish_non_exhaustive()
    }
}
