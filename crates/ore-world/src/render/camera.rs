//! A simple 2D orthographic camera.

/// Orthographic camera over the world.
///
/// The camera covers `width x height` world units scaled by `zoom`, centred
/// on `(x, y)`. With `y_down` set, world y grows towards the bottom of the
/// screen, matching tile rows.
///
/// [`combined`](Self::combined) is cached: after moving or zooming the
/// camera, call [`update`](Self::update) before handing the matrix to a
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Width of the visible area in world units at zoom 1.
    pub width: f32,
    /// Height of the visible area in world units at zoom 1.
    pub height: f32,
    /// Camera center X in world units.
    pub x: f32,
    /// Camera center Y in world units.
    pub y: f32,
    /// Scale of the visible area; values above 1 show more of the world.
    pub zoom: f32,
    pub y_down: bool,
    combined: [f32; 16],
}

impl Camera2D {
    /// A y-down camera of the given viewport, centred on its own middle.
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            width,
            height,
            x: width / 2.0,
            y: height / 2.0,
            zoom: 1.0,
            y_down: true,
            combined: [0.0; 16],
        };
        camera.update();
        camera
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Recompute the cached projection from the current position and zoom.
    pub fn update(&mut self) {
        self.combined = self.orthographic_matrix();
    }

    /// The projection as of the last [`update`](Self::update).
    pub fn combined(&self) -> [f32; 16] {
        self.combined
    }

    /// Produce a column-major 4x4 orthographic projection matrix.
    ///
    /// Maps the visible world rectangle to clip space `[-1, 1]` on both axes.
    pub fn orthographic_matrix(&self) -> [f32; 16] {
        let half_w = self.width * self.zoom / 2.0;
        let half_h = self.height * self.zoom / 2.0;
        let left = self.x - half_w;
        let right = self.x + half_w;
        let (bottom, top) = if self.y_down {
            (self.y + half_h, self.y - half_h)
        } else {
            (self.y - half_h, self.y + half_h)
        };

        let sx = 2.0 / (right - left);
        let sy = 2.0 / (top - bottom);
        let tx = -(right + left) / (right - left);
        let ty = -(top + bottom) / (top - bottom);

        [
            sx, 0.0, 0.0, 0.0, // column 0
            0.0, sy, 0.0, 0.0, // column 1
            0.0, 0.0, 1.0, 0.0, // column 2
            tx, ty, 0.0, 1.0, // column 3
        ]
    }

    /// Map a world point to clip space with the cached matrix.
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.combined;
        (m[0] * x + m[12], m[5] * y + m[13])
    }
}
