//! Component records attached to world entities.
//!
//! Each kind owns one narrow slice of entity state. All of them are pooled
//! by the entity engine, so `Default` doubles as the pooled (reset) state.

use std::fmt;

use ore_ecs::component::Component;
use serde::{Deserialize, Serialize};

use crate::block::BlockType;

// ---------------------------------------------------------------------------
// HealthComponent
// ---------------------------------------------------------------------------

/// Hit points of a living entity.
///
/// The fields are public so systems can read them directly. The mutators
/// keep `0 <= health <= max_health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthComponent {
    pub max_health: i32,
    pub health: i32,
}

impl HealthComponent {
    pub const DEFAULT_MAX_HEALTH: i32 = 25_000;

    /// Full health out of `max_health` (negative values count as zero).
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            max_health,
            health: max_health,
        }
    }

    /// Set the current health, clamped into `0..=max_health`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Change the maximum, pulling the current health down if needed.
    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health.max(0);
        self.health = self.health.clamp(0, self.max_health);
    }

    /// Remove up to `amount` health. Returns the health actually lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.set_health(before.saturating_sub(amount.max(0)));
        before - self.health
    }

    /// Restore up to `amount` health. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.set_health(before.saturating_add(amount.max(0)));
        self.health - before
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_HEALTH)
    }
}

impl Component for HealthComponent {
    const NAME: &'static str = "health";

    fn copy_from(&mut self, other: &Self) {
        self.max_health = other.max_health;
        self.health = other.health;
    }
}

impl fmt::Display for HealthComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "healthComponent.maxHealth: {}", self.max_health)?;
        writeln!(f, "healthComponent.health: {}", self.health)
    }
}

// ---------------------------------------------------------------------------
// ItemComponent
// ---------------------------------------------------------------------------

/// An entity that can sit in an inventory stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemComponent {
    pub stack_size: u32,
    pub max_stack_size: u32,
}

impl Component for ItemComponent {
    const NAME: &'static str = "item";
}

// ---------------------------------------------------------------------------
// BlockComponent
// ---------------------------------------------------------------------------

/// A dropped or held block, carrying its material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockComponent {
    pub block_type: BlockType,
}

impl Component for BlockComponent {
    const NAME: &'static str = "block";
}

// ---------------------------------------------------------------------------
// SpriteComponent
// ---------------------------------------------------------------------------

/// Visual of an entity: a logical texture name and its size in world units.
///
/// The texture name is resolved by the renderer's asset collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteComponent {
    pub texture: String,
    pub width: f32,
    pub height: f32,
}

impl SpriteComponent {
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

impl Component for SpriteComponent {
    const NAME: &'static str = "sprite";

    fn copy_from(&mut self, other: &Self) {
        self.texture.clone_from(&other.texture);
        self.width = other.width;
        self.height = other.height;
    }

    // Keeps the texture string's buffer for the next user of the pool.
    fn reset(&mut self) {
        self.texture.clear();
        self.width = 0.0;
        self.height = 0.0;
    }
}

// ---------------------------------------------------------------------------
// VelocityComponent
// ---------------------------------------------------------------------------

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityComponent {
    pub x: f32,
    pub y: f32,
}

impl Component for VelocityComponent {
    const NAME: &'static str = "velocity";
}

// ---------------------------------------------------------------------------
// AirGeneratorComponent
// ---------------------------------------------------------------------------

/// A placeable device that produces breathable air.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirGeneratorComponent {
    pub air_output_rate: i32,
}

impl Component for AirGeneratorComponent {
    const NAME: &'static str = "air_generator";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
