//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Unit archetype. Stats are looked up per type, never stored per unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[default]
    Mothership,
    Scout,
    Miner,
    Fighter,
}

/// Tactical behavior mode controlling automatic small-cannon engagement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorMode {
    /// Engage anything within full range.
    Offensive,
    /// Engage within a reduced range.
    #[default]
    Defensive,
    /// Engage within normal range; Miners keep mining instead.
    HoldGround,
    /// Never auto-fire.
    Passive,
}

/// What the Mothership is currently building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionMode {
    #[default]
    None,
    Miner,
    Fighter,
}

impl ProductionMode {
    /// Unit type produced by this mode, if any.
    pub fn unit_type(self) -> Option<UnitType> {
        match self {
            ProductionMode::None => None,
            ProductionMode::Miner => Some(UnitType::Miner),
            ProductionMode::Fighter => Some(UnitType::Fighter),
        }
    }
}

/// Visual particle type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    #[default]
    Spark,
    Puff,
    Debris,
    Shockwave,
    Glow,
    /// Beam connecting `position` to `target`.
    Tracer,
    MiningSpark,
    MiningStream,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// Severity of a player-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageLevel {
    Info,
    Warning,
}
