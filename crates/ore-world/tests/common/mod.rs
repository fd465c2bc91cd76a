//! Recording render collaborators shared by the integration tests.
//!
//! Every double appends to one shared call log so tests can assert on the
//! order of calls across collaborators.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use ore_world::prelude::*;

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn clear(log: &CallLog) {
    log.lock().unwrap().clear();
}

fn record(log: &CallLog, call: impl Into<String>) {
    log.lock().unwrap().push(call.into());
}

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

pub struct RecordingBatch {
    log: CallLog,
    /// Projection matrices in the order they were set.
    pub projections: Arc<Mutex<Vec<[f32; 16]>>>,
    /// Sprites drawn, as `(x, y, texture)`.
    pub drawn: Arc<Mutex<Vec<(f32, f32, Option<TextureHandle>)>>>,
}

impl RenderBatch for RecordingBatch {
    fn set_projection_matrix(&mut self, matrix: [f32; 16]) {
        self.projections.lock().unwrap().push(matrix);
        record(&self.log, "batch.set_projection_matrix");
    }

    fn begin(&mut self) {
        record(&self.log, "batch.begin");
    }

    fn draw(&mut self, sprite: &Sprite) {
        self.drawn
            .lock()
            .unwrap()
            .push((sprite.x, sprite.y, sprite.texture));
        record(&self.log, "batch.draw");
    }

    fn end(&mut self) {
        record(&self.log, "batch.end");
    }

    fn dispose(&mut self) {
        record(&self.log, "batch.dispose");
    }
}

pub struct RecordingTiles {
    log: CallLog,
    /// Player x seen by the tile renderer each frame.
    pub player_x: Arc<Mutex<Vec<f32>>>,
}

impl TileRenderer for RecordingTiles {
    fn render(&mut self, view: &TileView<'_>, _elapsed: f64) {
        self.player_x.lock().unwrap().push(view.player.x);
        record(&self.log, "tiles.render");
    }
}

pub struct RecordingSprites {
    log: CallLog,
}

impl SpriteRenderer for RecordingSprites {
    fn render_entities(&mut self, _engine: &Engine, _elapsed: f64) {
        record(&self.log, "sprites.render_entities");
    }

    fn render_characters(&mut self, _engine: &Engine, _elapsed: f64) {
        record(&self.log, "sprites.render_characters");
    }

    fn render_dropped_entities(&mut self, _engine: &Engine, _elapsed: f64) {
        record(&self.log, "sprites.render_dropped_entities");
    }

    fn render_dropped_blocks(&mut self, _engine: &Engine, _elapsed: f64) {
        record(&self.log, "sprites.render_dropped_blocks");
    }
}

pub struct RecordingAssets {
    log: CallLog,
    next: u32,
    /// Paths that fail to load.
    pub missing: Vec<String>,
}

impl AssetSource for RecordingAssets {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError> {
        record(&self.log, format!("assets.load {path}"));
        if self.missing.iter().any(|m| m == path) {
            return Err(AssetError::NotFound {
                path: path.to_owned(),
            });
        }
        self.next += 1;
        Ok(TextureHandle(self.next))
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        record(&self.log, format!("assets.release {}", texture.0));
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Handles onto everything a recording backend observes.
pub struct Recorder {
    pub log: CallLog,
    pub projections: Arc<Mutex<Vec<[f32; 16]>>>,
    pub drawn: Arc<Mutex<Vec<(f32, f32, Option<TextureHandle>)>>>,
    pub tile_player_x: Arc<Mutex<Vec<f32>>>,
}

pub fn recording_backend() -> (ClientBackend, Recorder) {
    recording_backend_with_missing(Vec::new())
}

pub fn recording_backend_with_missing(missing: Vec<String>) -> (ClientBackend, Recorder) {
    let recorder = Recorder {
        log: CallLog::default(),
        projections: Arc::default(),
        drawn: Arc::default(),
        tile_player_x: Arc::default(),
    };
    let backend = ClientBackend::new(
        RecordingBatch {
            log: recorder.log.clone(),
            projections: recorder.projections.clone(),
            drawn: recorder.drawn.clone(),
        },
        RecordingTiles {
            log: recorder.log.clone(),
            player_x: recorder.tile_player_x.clone(),
        },
        RecordingSprites {
            log: recorder.log.clone(),
        },
        RecordingAssets {
            log: recorder.log.clone(),
            next: 0,
            missing,
        },
    );
    (backend, recorder)
}

pub fn small_config() -> WorldConfig {
    WorldConfig::with_dimensions(16, 32)
}

pub fn client_world() -> (World, Recorder) {
    let (backend, recorder) = recording_backend();
    let world = World::new(small_config(), WorldRole::Client(backend)).unwrap();
    (world, recorder)
}

pub fn server_world() -> World {
    World::new(small_config(), WorldRole::Server).unwrap()
}
