//! Headless server demo -- generates layered terrain, spawns a few entities
//! and runs the world for a while without any renderer.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example headless_server -p ore-world

use ore_world::prelude::*;

const TICKS: u64 = 600;
const DAMPING_PER_SECOND: f32 = 0.5;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Slow dropped items down until they come to rest.
fn damping_system(engine: &mut Engine, elapsed: f64) {
    let factor = (1.0 - DAMPING_PER_SECOND * elapsed as f32).max(0.0);
    for (_, velocity) in engine.iter_mut::<VelocityComponent>() {
        velocity.x *= factor;
        velocity.y *= factor;
    }
}

fn air_system(engine: &mut Engine, elapsed: f64) {
    let total: i32 = engine
        .iter::<AirGeneratorComponent>()
        .map(|(_, g)| g.air_output_rate)
        .sum();
    tracing::trace!(total, elapsed, "air produced");
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = WorldConfig::with_dimensions(256, 512);
    let terrain = LayeredTerrain {
        seed: 42,
        ..LayeredTerrain::default()
    };
    let mut world = World::with_terrain(config, WorldRole::Server, &terrain)?;

    world.engine_mut().add_system("damping", damping_system);
    world.engine_mut().add_system("air", air_system);

    let player = world.engine_mut().create_entity();
    world
        .engine_mut()
        .attach(player, HealthComponent::default())?;
    world.add_player(player);

    for i in 0..8 {
        let item = world.engine_mut().create_entity();
        world.create_block_item(item)?;
        if let Some(velocity) = world.engine_mut().get_mut::<VelocityComponent>(item) {
            velocity.x = i as f32;
            velocity.y = -2.0;
        }
    }
    world.create_air_generator()?;

    let grid = world.grid();
    for block_type in BlockType::ALL {
        tracing::info!(%block_type, tiles = grid.count(block_type), "terrain");
    }

    let mut frames = FrameLoop::new(world, FrameConfig::default());
    frames.run_ticks(TICKS, &InputState::NONE)?;

    let world = frames.world();
    let resting = world
        .engine()
        .iter::<VelocityComponent>()
        .filter(|(_, v)| v.x.abs() < 0.1 && v.y.abs() < 0.1)
        .count();
    tracing::info!(
        ticks = frames.tick_count(),
        sim_time = frames.sim_time(),
        entities = world.engine().entity_count(),
        resting,
        last_frame = ?frames.last_diagnostics().total_time,
        "simulation finished"
    );
    Ok(())
}
