//! Immutable inputs and outputs exchanged with the background scans.
//!
//! The simulation copies the fields a scan needs into these structs, so the
//! worker threads never touch live entity pools.

use serde::{Deserialize, Serialize};

use starhaul_core::components::{Asteroid, Unit};
use starhaul_core::enums::{BehaviorMode, UnitType};
use starhaul_core::types::{Handle, Vec2};

/// One unit as seen by the target scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitProbe {
    pub unit: Handle<Unit>,
    pub unit_type: UnitType,
    pub position: Vec2,
    pub behavior: BehaviorMode,
    /// Priority target from the unit's current AttackMove order.
    pub attack_target: Option<Handle<Asteroid>>,
    /// Target chosen by the previous scan, for stickiness.
    pub previous_target: Option<Handle<Asteroid>>,
}

/// One live asteroid as seen by the target and radar scans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsteroidProbe {
    pub asteroid: Handle<Asteroid>,
    pub position: Vec2,
    pub radius: f32,
}

/// Everything the target scan reads, copied out on the main thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetingSnapshot {
    /// Simulation tick the snapshot was taken on.
    pub tick: u64,
    pub units: Vec<UnitProbe>,
    pub asteroids: Vec<AsteroidProbe>,
}

/// Best target for one unit; applied to all of its small-cannon slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSuggestion {
    pub unit: Handle<Unit>,
    pub target: Option<Handle<Asteroid>>,
}

/// Output of one full scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSuggestions {
    /// Tick of the snapshot these were computed from.
    pub tick: u64,
    pub suggestions: Vec<TargetSuggestion>,
}

/// Input for a radar pass.
#[derive(Debug, Clone, Default)]
pub struct RadarInput {
    /// Last published Mothership position.
    pub center: Vec2,
    pub range: f32,
    pub asteroids: Vec<AsteroidProbe>,
}
