//! The tile grid.
//!
//! A [`TileGrid`] is a fixed `columns x rows` array of [`Block`]s stored
//! column-major in one flat allocation: tile `(x, y)` lives at
//! `x * rows + y`. The grid is allocated once and never resized.
//!
//! Coordinates are checked strictly (`0 <= x < columns`, `0 <= y < rows`).
//! [`TileGrid::get`] reports a violation as [`GridError::OutOfBounds`];
//! [`TileGrid::block_at`] treats it as a broken precondition and panics.
//! Nothing is ever clamped to the nearest edge.

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockType};

/// A continuous position in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Errors produced by grid access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The coordinates fall outside the grid.
    #[error("tile ({x}, {y}) is outside the {columns}x{rows} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        columns: u32,
        rows: u32,
    },
}

/// Fixed-size grid of block tiles.
#[derive(Debug, Clone)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    /// Tile edge length in world units.
    block_size: f32,
    blocks: Box<[Block]>,
}

impl TileGrid {
    /// Allocate a grid of `columns x rows` empty tiles.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is not positive or the tile count overflows
    /// `usize`. [`WorldConfig::validate`](crate::config::WorldConfig::validate)
    /// rejects both before a world builds its grid.
    pub fn new(columns: u32, rows: u32, block_size: f32) -> Self {
        assert!(
            block_size > 0.0 && block_size.is_finite(),
            "block_size must be positive and finite, got {block_size}"
        );
        let len = (columns as usize)
            .checked_mul(rows as usize)
            .unwrap_or_else(|| panic!("{columns}x{rows} tiles overflow usize"));
        Self {
            columns,
            rows,
            block_size,
            blocks: vec![Block::NULL; len].into_boxed_slice(),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile edge length in world units.
    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The flat tile storage, column-major.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether `(x, y)` addresses a tile.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.columns && (y as u32) < self.rows
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(x as usize * self.rows as usize + y as usize)
    }

    /// Grid coordinates of the tile containing `pos`.
    pub fn tile_coords(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.block_size).floor() as i32,
            (pos.y / self.block_size).floor() as i32,
        )
    }

    // -- access ---------------------------------------------------------------

    /// The block at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<&Block, GridError> {
        let idx = self.index(x, y)?;
        Ok(&self.blocks[idx])
    }

    /// The block at `(x, y)`, mutably.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Result<&mut Block, GridError> {
        let idx = self.index(x, y)?;
        Ok(&mut self.blocks[idx])
    }

    /// The block at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[track_caller]
    pub fn block_at(&self, x: i32, y: i32) -> &Block {
        match self.get(x, y) {
            Ok(block) => block,
            Err(err) => panic!("{err}"),
        }
    }

    /// The block at `(x, y)`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[track_caller]
    pub fn block_at_mut(&mut self, x: i32, y: i32) -> &mut Block {
        match self.get_mut(x, y) {
            Ok(block) => block,
            Err(err) => panic!("{err}"),
        }
    }

    /// The block under a continuous world position.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    #[track_caller]
    pub fn block_at_position(&self, pos: Vec2) -> &Block {
        let (x, y) = self.tile_coords(pos);
        self.block_at(x, y)
    }

    /// Fallible counterpart of [`block_at_position`](Self::block_at_position).
    pub fn get_at_position(&self, pos: Vec2) -> Result<&Block, GridError> {
        let (x, y) = self.tile_coords(pos);
        self.get(x, y)
    }

    /// Overwrite the type of the block at `(x, y)`.
    pub fn set_block(&mut self, x: i32, y: i32, block_type: BlockType) -> Result<(), GridError> {
        self.get_mut(x, y)?.block_type = block_type;
        Ok(())
    }

    /// Fill every tile of rows `rows` (clipped to the grid) with `block_type`.
    pub fn fill_rows(&mut self, rows: std::ops::Range<u32>, block_type: BlockType) {
        let end = rows.end.min(self.rows);
        let start = rows.start.min(end);
        let height = self.rows as usize;
        if height == 0 {
            return;
        }
        for column in self.blocks.chunks_mut(height) {
            for block in &mut column[start as usize..end as usize] {
                block.block_type = block_type;
            }
        }
    }

    // -- queries --------------------------------------------------------------

    /// Whether the tile at `(x, y)` is occupied by a solid block.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[track_caller]
    pub fn is_block_solid(&self, x: i32, y: i32) -> bool {
        self.block_at(x, y).is_solid()
    }

    /// Whether a block may be placed at `(x, y)`.
    ///
    /// Only the tile is checked; entities overlapping it are not.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[track_caller]
    pub fn can_place_block(&self, x: i32, y: i32) -> bool {
        self.block_at(x, y).is_placeable()
    }

    /// Number of tiles holding `block_type`.
    pub fn count(&self, block_type: BlockType) -> usize {
        self.blocks.iter().filter(|b| b.block_type == block_type).count()
    }
}
