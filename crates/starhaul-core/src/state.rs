//! World snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::commands::UnitCommand;
use crate::enums::*;
use crate::events::{SimEvent, UiMessage};
use crate::types::{Color, SimTime, Vec2};

/// Read-only view of the world after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub camera: Vec2,
    pub economy: EconomyView,
    pub units: Vec<UnitView>,
    pub asteroids: Vec<AsteroidView>,
    pub resources: Vec<ResourceView>,
    pub particles: Vec<ParticleView>,
    /// Latest radar scan around the Mothership.
    pub radar_contacts: Vec<Vec2>,
    /// Seconds until the Mothership returns, if it is down.
    pub respawn_remaining: Option<f32>,
    pub messages: Vec<UiMessage>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub energy: f32,
    pub max_energy: f32,
    pub resources_stored: f32,
    pub unit_count: usize,
    pub asteroid_count: usize,
    pub resource_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub slot: u32,
    pub generation: u32,
    pub unit_type: UnitType,
    pub position: Vec2,
    pub rotation: f32,
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub cargo: f32,
    pub behavior: BehaviorMode,
    pub current_command: UnitCommand,
    pub selected: bool,
    pub production: ProductionMode,
    /// Build progress in [0, 1].
    pub production_progress: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub slot: u32,
    pub position: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub health_fraction: f32,
    pub targeted: bool,
    pub texture_variant: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceView {
    pub slot: u32,
    pub position: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub amount: f32,
    pub texture_variant: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub target: Option<Vec2>,
    pub size: f32,
    pub color: Color,
    /// Remaining life in [0, 1].
    pub life_fraction: f32,
    pub rotation: f32,
}
