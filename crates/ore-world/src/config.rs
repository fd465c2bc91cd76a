//! World configuration.
//!
//! All world-wide constants (pixel scale, grid dimensions, sea level, pool
//! sizes) live in a [`WorldConfig`] that is handed to the world at
//! construction. Tests build small grids with
//! [`WorldConfig::with_dimensions`]; hosts can load a config from JSON with
//! [`WorldConfig::from_json_str`].

use ore_ecs::pool::PoolConfig;
use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON text could not be parsed into a config.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the world cannot be built with.
    #[error("invalid world config field '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Process-wide world constants, injected at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Screen pixels per world meter.
    pub pixels_per_meter: f32,
    /// Edge length of one tile in pixels.
    pub block_size_pixels: f32,
    /// Grid width in tiles.
    pub columns: u32,
    /// Grid height in tiles.
    pub rows: u32,
    /// Row index terrain generation starts from.
    pub sea_level: u32,
    /// Client viewport width in pixels.
    pub viewport_width_px: f32,
    /// Client viewport height in pixels.
    pub viewport_height_px: f32,
    /// Horizontal distance the player sprite moves per rendered frame.
    pub player_movement_speed: f32,
    /// File path of the texture given to the client's placeholder sprites.
    pub placeholder_texture: String,
    /// Entity and component pool sizes.
    pub pools: PoolConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 50.0,
            block_size_pixels: 16.0,
            columns: 2400,
            rows: 8400,
            sea_level: 50,
            viewport_width_px: 1600.0,
            viewport_height_px: 900.0,
            player_movement_speed: 3.5,
            placeholder_texture: "crap.png".to_owned(),
            pools: PoolConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Default config with a `columns` x `rows` grid. Sea level is pulled
    /// inside the grid if the default would fall outside it.
    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        let defaults = Self::default();
        Self {
            columns,
            rows,
            sea_level: defaults.sea_level.min(rows.saturating_sub(1)),
            ..defaults
        }
    }

    /// Parse and validate a config from JSON. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Edge length of one tile in world units (meters).
    pub fn block_size(&self) -> f32 {
        self.block_size_pixels / self.pixels_per_meter
    }

    /// Client viewport size in world units.
    pub fn viewport_world_size(&self) -> (f32, f32) {
        (
            self.viewport_width_px / self.pixels_per_meter,
            self.viewport_height_px / self.pixels_per_meter,
        )
    }

    /// Total number of tiles in the grid.
    pub fn tile_count(&self) -> Option<usize> {
        (self.columns as usize).checked_mul(self.rows as usize)
    }

    /// Check that a world can be built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive and finite, got {value}"),
                })
            }
        }

        positive("pixels_per_meter", self.pixels_per_meter)?;
        positive("block_size_pixels", self.block_size_pixels)?;
        positive("viewport_width_px", self.viewport_width_px)?;
        positive("viewport_height_px", self.viewport_height_px)?;

        if !self.player_movement_speed.is_finite() {
            return Err(ConfigError::Invalid {
                field: "player_movement_speed",
                reason: format!("must be finite, got {}", self.player_movement_speed),
            });
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid {
                field: "columns",
                reason: format!("grid must not be empty, got {}x{}", self.columns, self.rows),
            });
        }
        if self.columns > i32::MAX as u32 || self.rows > i32::MAX as u32 {
            return Err(ConfigError::Invalid {
                field: "rows",
                reason: "grid dimensions must fit in i32 coordinates".to_owned(),
            });
        }
        if self.tile_count().is_none() {
            return Err(ConfigError::Invalid {
                field: "rows",
                reason: format!("{}x{} tiles overflow usize", self.columns, self.rows),
            });
        }
        if self.sea_level >= self.rows {
            return Err(ConfigError::Invalid {
                field: "sea_level",
                reason: format!("{} is outside a grid of {} rows", self.sea_level, self.rows),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_constants() {
        let config = WorldConfig::default();
        assert_eq!(config.columns, 2400);
        assert_eq!(config.rows, 8400);
        assert_eq!(config.sea_level, 50);
        assert!((config.block_size() - 0.32).abs() < 1e-6);
        assert_eq!(config.viewport_world_size(), (32.0, 18.0));
        assert_eq!(config.pools, PoolConfig::uniform(2000));
        config.validate().unwrap();
    }

    #[test]
    fn with_dimensions_keeps_sea_level_inside_grid() {
        let config = WorldConfig::with_dimensions(8, 10);
        assert_eq!(config.sea_level, 9);
        config.validate().unwrap();

        let tall = WorldConfig::with_dimensions(8, 100);
        assert_eq!(tall.sea_level, 50);
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "columns": 64, "rows": 128, "sea_level": 10 }"#)
            .unwrap();
        assert_eq!(config.columns, 64);
        assert_eq!(config.rows, 128);
        assert_eq!(config.sea_level, 10);
        assert_eq!(config.pixels_per_meter, 50.0);
    }

    #[test]
    fn json_rejects_invalid_values() {
        let err = WorldConfig::from_json_str(r#"{ "rows": 10, "sea_level": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sea_level", .. }), "{err}");

        let err = WorldConfig::from_json_str(r#"{ "pixels_per_meter": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pixels_per_meter", .. }));

        let err = WorldConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_grid_is_invalid() {
        let err = WorldConfig::with_dimensions(0, 4).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "columns", .. }));
    }
}
