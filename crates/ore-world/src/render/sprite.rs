//! Positioned, textured quads drawn straight through a render batch.

use super::TextureHandle;

/// A textured rectangle with its top-left corner at `(x, y)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub texture: Option<TextureHandle>,
}

impl Sprite {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn translate_x(&mut self, dx: f32) {
        self.x += dx;
    }

    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.texture = Some(texture);
    }
}
