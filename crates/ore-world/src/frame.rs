//! Fixed-timestep frame loop.
//!
//! The [`FrameLoop`] owns a [`World`] and advances it one frame per
//! [`tick`](FrameLoop::tick):
//!
//! 1. [`World::update`] runs every engine system with the fixed time step.
//! 2. On a client world, [`World::render`] draws the frame and applies the
//!    input snapshot.
//! 3. The tick counter advances.
//!
//! Simulation time is derived from the tick count, so it never drifts.
//!
//! # Example
//!
//! ```
//! use ore_world::prelude::*;
//!
//! let world = World::new(WorldConfig::with_dimensions(16, 16), WorldRole::Server)?;
//! let mut frames = FrameLoop::new(world, FrameConfig { fixed_dt: 0.5 });
//!
//! frames.run_ticks(4, &InputState::NONE)?;
//! assert_eq!(frames.tick_count(), 4);
//! assert_eq!(frames.sim_time(), 2.0);
//! # Ok::<(), ore_world::WorldError>(())
//! ```

use std::time::{Duration, Instant};

use crate::render::InputState;
use crate::world::World;
use crate::WorldError;

// ---------------------------------------------------------------------------
// FrameConfig
// ---------------------------------------------------------------------------

/// Configuration for the fixed-timestep frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    /// Seconds per frame. Must be positive and finite.
    pub fixed_dt: f64,
}

impl Default for FrameConfig {
    /// 60 frames per second.
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
        }
    }
}

// ---------------------------------------------------------------------------
// FrameDiagnostics
// ---------------------------------------------------------------------------

/// Timing of the last frame.
#[derive(Debug, Clone, Default)]
pub struct FrameDiagnostics {
    /// Time spent running engine systems.
    pub update_time: Duration,
    /// Time spent rendering; zero on a server.
    pub render_time: Duration,
    pub total_time: Duration,
}

// ---------------------------------------------------------------------------
// FrameLoop
// ---------------------------------------------------------------------------

/// Drives a [`World`] at a fixed time step.
#[derive(Debug)]
pub struct FrameLoop {
    world: World,
    fixed_dt: f64,
    tick_counter: u64,
    last_diagnostics: FrameDiagnostics,
}

impl FrameLoop {
    /// Wrap `world` in a frame loop starting at tick 0.
    ///
    /// # Panics
    ///
    /// Panics if `config.fixed_dt` is not positive and finite.
    pub fn new(world: World, config: FrameConfig) -> Self {
        assert!(
            config.fixed_dt > 0.0 && config.fixed_dt.is_finite(),
            "fixed_dt must be positive and finite, got {}",
            config.fixed_dt
        );
        Self {
            world,
            fixed_dt: config.fixed_dt,
            tick_counter: 0,
            last_diagnostics: FrameDiagnostics::default(),
        }
    }

    /// Run one frame.
    ///
    /// If rendering fails the tick counter does not advance, although the
    /// update has already run.
    pub fn tick(&mut self, input: &InputState) -> Result<(), WorldError> {
        let frame_start = Instant::now();

        self.world.update(self.fixed_dt);
        let update_time = frame_start.elapsed();

        let render_time = if self.world.is_client() {
            let render_start = Instant::now();
            self.world.render(self.fixed_dt, input)?;
            render_start.elapsed()
        } else {
            Duration::ZERO
        };

        self.tick_counter += 1;
        self.last_diagnostics = FrameDiagnostics {
            update_time,
            render_time,
            total_time: frame_start.elapsed(),
        };
        tracing::trace!(tick = self.tick_counter, ?update_time, ?render_time, "frame");
        Ok(())
    }

    /// Run `count` frames with the same input, stopping at the first error.
    pub fn run_ticks(&mut self, count: u64, input: &InputState) -> Result<(), WorldError> {
        for _ in 0..count {
            self.tick(input)?;
        }
        Ok(())
    }

    // -- accessors ----------------------------------------------------------

    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    /// Simulation time in seconds, `tick_count * fixed_dt`.
    pub fn sim_time(&self) -> f64 {
        self.tick_counter as f64 * self.fixed_dt
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Unwrap the loop, handing the world back.
    pub fn into_world(self) -> World {
        self.world
    }

    pub fn last_diagnostics(&self) -> &FrameDiagnostics {
        &self.last_diagnostics
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
