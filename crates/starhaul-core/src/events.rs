//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vec2;

/// Gameplay event drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    AsteroidDestroyed { position: Vec2, radius: f32 },
    CrystalDropped { position: Vec2, radius: f32 },
    CrystalDepleted { position: Vec2 },
    UnitDestroyed { unit_type: UnitType, position: Vec2 },
    MothershipDestroyed { position: Vec2 },
    MothershipRespawned { position: Vec2 },
    UnitProduced { unit_type: UnitType, slot: u32 },
}

/// Transient player-facing message (rejected orders and similar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiMessage {
    pub level: MessageLevel,
    pub text: String,
    pub tick: u64,
}
