//! Terrain generation.
//!
//! A world runs exactly one [`TerrainGenerator`] over its grid at
//! construction. The default, [`FlatTerrain`], leaves every tile empty.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::block::BlockType;
use crate::grid::TileGrid;

/// Fills a freshly allocated grid.
pub trait TerrainGenerator {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Populate `grid`. `sea_level` is the first row below the surface.
    fn generate(&self, grid: &mut TileGrid, sea_level: u32);
}

/// Produces no terrain: the grid stays empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTerrain;

impl TerrainGenerator for FlatTerrain {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn generate(&self, _grid: &mut TileGrid, _sea_level: u32) {}
}

/// Fills every row from sea level down with one block type.
#[derive(Debug, Clone, Copy)]
pub struct FillBelowSeaLevel {
    pub block_type: BlockType,
}

impl Default for FillBelowSeaLevel {
    fn default() -> Self {
        Self {
            block_type: BlockType::Dirt,
        }
    }
}

impl TerrainGenerator for FillBelowSeaLevel {
    fn name(&self) -> &'static str {
        "fill_below_sea_level"
    }

    fn generate(&self, grid: &mut TileGrid, sea_level: u32) {
        grid.fill_rows(sea_level..grid.rows(), self.block_type);
    }
}

/// Dirt crust over stone, with ores scattered through the stone.
///
/// Seeded, so the same seed and grid size always give the same terrain.
#[derive(Debug, Clone, Copy)]
pub struct LayeredTerrain {
    pub seed: u64,
    /// Rows of dirt directly below sea level.
    pub dirt_depth: u32,
    /// Probability that a stone tile is replaced by an ore.
    pub ore_chance: f64,
}

impl Default for LayeredTerrain {
    fn default() -> Self {
        Self {
            seed: 0,
            dirt_depth: 20,
            ore_chance: 0.05,
        }
    }
}

const ORES: [BlockType; 5] = [
    BlockType::Coal,
    BlockType::Copper,
    BlockType::Iron,
    BlockType::Uranium,
    BlockType::Diamond,
];

impl TerrainGenerator for LayeredTerrain {
    fn name(&self) -> &'static str {
        "layered"
    }

    fn generate(&self, grid: &mut TileGrid, sea_level: u32) {
        let rows = grid.rows();
        let stone_start = sea_level.saturating_add(self.dirt_depth).min(rows);
        grid.fill_rows(sea_level..stone_start, BlockType::Dirt);
        grid.fill_rows(stone_start..rows, BlockType::Stone);

        let ore_chance = if self.ore_chance.is_nan() {
            0.0
        } else {
            self.ore_chance.clamp(0.0, 1.0)
        };
        let mut rng = Pcg64::seed_from_u64(self.seed);
        for x in 0..grid.columns() as i32 {
            for y in stone_start as i32..rows as i32 {
                if rng.gen_bool(ore_chance) {
                    let ore = ORES[rng.gen_range(0..ORES.len())];
                    grid.block_at_mut(x, y).block_type = ore;
                }
            }
        }
        if rows > sea_level {
            grid.fill_rows(rows - 1..rows, BlockType::Bedrock);
        }
    }
}
