//! Entity records stored in the simulation pools.
//!
//! These are plain data. Game logic lives in the simulation systems.

use serde::{Deserialize, Serialize};

use crate::commands::CommandQueue;
use crate::constants::SMALL_CANNON_SLOTS;
use crate::enums::*;
use crate::stats::UnitStats;
use crate::types::{Color, Handle, Vec2};

/// A controllable ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Unit {
    pub unit_type: UnitType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub cargo: f32,
    pub max_cargo: f32,
    pub behavior: BehaviorMode,
    pub commands: CommandQueue,
    pub main_cannon_timer: f32,
    pub small_cannon_timers: [f32; SMALL_CANNON_SLOTS],
    pub mining_timer: f32,
    /// Direct main-cannon order. Bypasses the command queue.
    pub main_cannon_target: Option<Handle<Asteroid>>,
    /// Written from targeting suggestions, read by auto-fire.
    pub small_cannon_targets: [Option<Handle<Asteroid>>; SMALL_CANNON_SLOTS],
    /// Only meaningful for the Mothership.
    pub production: ProductionState,
}

impl Unit {
    /// A freshly built unit of `unit_type` at full health and energy.
    pub fn new(unit_type: UnitType, position: Vec2) -> Self {
        let stats = unit_type.stats();
        Self {
            unit_type,
            position,
            health: stats.max_health,
            max_health: stats.max_health,
            energy: stats.max_energy,
            max_energy: stats.max_energy,
            max_cargo: stats.max_cargo,
            ..Default::default()
        }
    }

    pub fn stats(&self) -> &'static UnitStats {
        self.unit_type.stats()
    }

    pub fn is_mothership(&self) -> bool {
        self.unit_type == UnitType::Mothership
    }

    pub fn cargo_full(&self) -> bool {
        !self.is_mothership() && self.cargo >= self.max_cargo
    }
}

/// Mothership production slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionState {
    pub mode: ProductionMode,
    /// Seconds accumulated toward the current build. Zero = cycle not started.
    pub timer: f32,
}

/// A drifting rock. Health scales with radius.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Set while some unit is aiming at this asteroid this tick.
    #[serde(skip)]
    pub targeted_this_frame: bool,
    pub texture_variant: u8,
}

impl Asteroid {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, health_multiplier: f32) -> Self {
        let health = radius * health_multiplier;
        Self {
            position,
            velocity,
            radius,
            health,
            max_health: health,
            ..Default::default()
        }
    }

    /// Effective collision radius.
    pub fn hitbox(&self) -> f32 {
        self.radius * crate::constants::ASTEROID_HITBOX_MULTIPLIER
    }
}

/// A mineable crystal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Remaining yield.
    pub amount: f32,
    pub texture_variant: u8,
}

impl Resource {
    pub fn new(position: Vec2, radius: f32) -> Self {
        let health = radius * crate::constants::CRYSTAL_HEALTH_MULTIPLIER;
        Self {
            position,
            radius,
            health,
            max_health: health,
            amount: health,
            ..Default::default()
        }
    }

    pub fn visual_radius(&self) -> f32 {
        self.radius * crate::constants::CRYSTAL_VISUAL_SCALE
    }
}

/// A short-lived visual effect.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds left; dead at zero.
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Color,
    /// Far end of beam-type particles.
    pub target: Option<Vec2>,
    pub rotation: f32,
}
