//! Property tests for tile addressing and block queries on a world grid.

use std::panic::{catch_unwind, AssertUnwindSafe};

use ore_world::prelude::*;
use proptest::prelude::*;

const COLUMNS: u32 = 12;
const ROWS: u32 = 20;

fn block_type_strategy() -> impl Strategy<Value = BlockType> {
    prop::sample::select(BlockType::ALL.to_vec())
}

/// A server world whose grid holds the given tiles, column by column.
fn world_with(tiles: &[(u32, u32, BlockType)]) -> World {
    let mut world = World::new(
        WorldConfig::with_dimensions(COLUMNS, ROWS),
        WorldRole::Server,
    )
    .unwrap();
    for &(x, y, block_type) in tiles {
        world
            .grid_mut()
            .set_block(x as i32, y as i32, block_type)
            .unwrap();
    }
    world
}

fn tiles_strategy() -> impl Strategy<Value = Vec<(u32, u32, BlockType)>> {
    prop::collection::vec((0..COLUMNS, 0..ROWS, block_type_strategy()), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn block_at_is_stable(x in 0..COLUMNS as i32, y in 0..ROWS as i32) {
        let world = world_with(&[]);
        prop_assert!(std::ptr::eq(world.block_at(x, y), world.block_at(x, y)));
    }

    #[test]
    fn placeable_iff_null(tiles in tiles_strategy(), x in 0..COLUMNS as i32, y in 0..ROWS as i32) {
        let world = world_with(&tiles);
        let is_null = world.block_at(x, y).block_type == BlockType::Null;
        prop_assert_eq!(world.can_place_block(x, y), is_null);
    }

    #[test]
    fn solid_iff_not_null(tiles in tiles_strategy(), x in 0..COLUMNS as i32, y in 0..ROWS as i32) {
        let world = world_with(&tiles);
        prop_assert_eq!(world.is_block_solid(x, y), !world.can_place_block(x, y));
    }

    #[test]
    fn position_floors_to_tile(
        tiles in tiles_strategy(),
        x in 0..COLUMNS as i32,
        y in 0..ROWS as i32,
        fx in 0.01f32..0.99,
        fy in 0.01f32..0.99,
    ) {
        let world = world_with(&tiles);
        let size = world.config().block_size();
        let pos = Vec2::new((x as f32 + fx) * size, (y as f32 + fy) * size);
        prop_assert!(std::ptr::eq(world.block_at_position(pos), world.block_at(x, y)));
    }

    #[test]
    fn fallible_access_matches_bounds(x in -5i32..COLUMNS as i32 + 5, y in -5i32..ROWS as i32 + 5) {
        let world = world_with(&[]);
        let inside = x >= 0 && y >= 0 && x < COLUMNS as i32 && y < ROWS as i32;
        prop_assert_eq!(world.grid().get(x, y).is_ok(), inside);
    }
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[test]
fn last_tile_is_addressable() {
    let world = world_with(&[(COLUMNS - 1, ROWS - 1, BlockType::Iron)]);
    let last = world.block_at(COLUMNS as i32 - 1, ROWS as i32 - 1);
    assert_eq!(last.block_type, BlockType::Iron);
}

#[test]
fn first_tile_past_each_edge_panics() {
    let world = world_with(&[]);
    for (x, y) in [
        (COLUMNS as i32, 0),
        (0, ROWS as i32),
        (-1, 0),
        (0, -1),
    ] {
        let result = catch_unwind(AssertUnwindSafe(|| {
            world.block_at(x, y);
        }));
        assert!(result.is_err(), "({x}, {y}) should be out of bounds");
    }
}

#[test]
#[should_panic(expected = "is outside the 12x20 grid")]
fn out_of_bounds_message_names_the_grid() {
    let world = world_with(&[]);
    world.block_at(COLUMNS as i32, 0);
}

#[test]
fn out_of_bounds_get_reports_coordinates() {
    let world = world_with(&[]);
    let err = world.grid().get(3, ROWS as i32).unwrap_err();
    assert_eq!(
        err,
        GridError::OutOfBounds {
            x: 3,
            y: ROWS as i32,
            columns: COLUMNS,
            rows: ROWS,
        }
    );
}

#[test]
fn negative_position_is_out_of_bounds() {
    let world = world_with(&[]);
    let pos = Vec2::new(-0.01, 0.5);
    assert!(world.grid().get_at_position(pos).is_err());
}
