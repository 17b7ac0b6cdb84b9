//! Immutable per-type unit statistics.

use serde::Serialize;

use crate::enums::UnitType;

/// Balance numbers shared by every unit of one type.
#[derive(Debug, Clone, Serialize)]
pub struct UnitStats {
    pub max_health: f32,
    /// Per-unit energy store. Zero for the Mothership, which draws on the global pool.
    pub max_energy: f32,
    /// Energy regenerated per second.
    pub energy_regen: f32,
    pub speed: f32,
    /// Steering responsiveness (1/s).
    pub acceleration: f32,
    /// Velocity damping applied when not driving (1/s).
    pub friction: f32,
    pub radius: f32,
    /// Zero means the unit cannot carry cargo; infinite means unbounded.
    pub max_cargo: f32,
    /// Crystal mined per second. Zero means the unit cannot gather.
    pub mining_rate: f32,
    pub small_cannons: usize,
    pub small_cannon_damage: f32,
    pub small_cannon_range: f32,
    pub small_cannon_cooldown: f32,
    pub small_cannon_energy: f32,
    /// Zero means no main cannon.
    pub main_cannon_damage: f32,
    pub main_cannon_range: f32,
    pub main_cannon_cooldown: f32,
    pub production_cost: f32,
    pub build_time: f32,
}

impl UnitStats {
    pub fn has_main_cannon(&self) -> bool {
        self.main_cannon_damage > 0.0
    }

    pub fn can_mine(&self) -> bool {
        self.mining_rate > 0.0
    }
}

static MOTHERSHIP: UnitStats = UnitStats {
    max_health: 2000.0,
    max_energy: 0.0,
    energy_regen: 0.0,
    speed: 60.0,
    acceleration: 1.5,
    friction: 1.2,
    radius: 60.0,
    max_cargo: f32::INFINITY,
    mining_rate: 60.0,
    small_cannons: 4,
    small_cannon_damage: 12.0,
    small_cannon_range: 400.0,
    small_cannon_cooldown: 0.5,
    small_cannon_energy: 2.0,
    main_cannon_damage: 300.0,
    main_cannon_range: 700.0,
    main_cannon_cooldown: 8.0,
    production_cost: 0.0,
    build_time: 0.0,
};

static SCOUT: UnitStats = UnitStats {
    max_health: 150.0,
    max_energy: 100.0,
    energy_regen: 8.0,
    speed: 260.0,
    acceleration: 4.0,
    friction: 2.0,
    radius: 14.0,
    max_cargo: 0.0,
    mining_rate: 0.0,
    small_cannons: 1,
    small_cannon_damage: 6.0,
    small_cannon_range: 300.0,
    small_cannon_cooldown: 0.4,
    small_cannon_energy: 1.0,
    main_cannon_damage: 0.0,
    main_cannon_range: 0.0,
    main_cannon_cooldown: 0.0,
    production_cost: 150.0,
    build_time: 8.0,
};

static MINER: UnitStats = UnitStats {
    max_health: 300.0,
    max_energy: 100.0,
    energy_regen: 5.0,
    speed: 140.0,
    acceleration: 3.0,
    friction: 2.0,
    radius: 20.0,
    max_cargo: 1000.0,
    mining_rate: 100.0,
    small_cannons: 1,
    small_cannon_damage: 5.0,
    small_cannon_range: 250.0,
    small_cannon_cooldown: 0.6,
    small_cannon_energy: 1.0,
    main_cannon_damage: 0.0,
    main_cannon_range: 0.0,
    main_cannon_cooldown: 0.0,
    production_cost: 200.0,
    build_time: 10.0,
};

static FIGHTER: UnitStats = UnitStats {
    max_health: 400.0,
    max_energy: 150.0,
    energy_regen: 10.0,
    speed: 200.0,
    acceleration: 3.5,
    friction: 2.0,
    radius: 18.0,
    max_cargo: 0.0,
    mining_rate: 0.0,
    small_cannons: 2,
    small_cannon_damage: 15.0,
    small_cannon_range: 380.0,
    small_cannon_cooldown: 0.3,
    small_cannon_energy: 3.0,
    main_cannon_damage: 120.0,
    main_cannon_range: 500.0,
    main_cannon_cooldown: 5.0,
    production_cost: 350.0,
    build_time: 14.0,
};

impl UnitType {
    /// Stats table entry for this type.
    pub fn stats(self) -> &'static UnitStats {
        match self {
            UnitType::Mothership => &MOTHERSHIP,
            UnitType::Scout => &SCOUT,
            UnitType::Miner => &MINER,
            UnitType::Fighter => &FIGHTER,
        }
    }
}
