//! Runtime simulation configuration.
//!
//! [`SimConfig`] mirrors the runtime-tunable values in [`crate::constants`],
//! which stay the authoritative defaults. A TOML file can override any
//! subset; missing keys fall back to the compile-time values.
//!
//! ```toml
//! seed = 7
//! dt = 0.0166667
//! asteroid_spawning = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed + same commands = same simulation.
    pub seed: u64,
    /// Seed for the celestial-body grid and density field.
    pub world_seed: u64,
    /// Fixed timestep in seconds.
    pub dt: f32,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    pub unit_cap: usize,

    // ── Spawning ──────────────────────────────────────────────────────────
    pub asteroid_spawning: bool,
    pub crystal_spawning: bool,
    pub despawn_radius: f32,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
    pub spawn_safe_zone: f32,
    pub spawn_attempts_per_tick: u32,

    // ── Economy ───────────────────────────────────────────────────────────
    pub starting_energy: f32,
    pub max_energy: f32,
    pub energy_regen_rate: f32,
    pub starting_resources: f32,

    // ── Mothership respawn ────────────────────────────────────────────────
    pub respawn_time: f32,
    pub respawn_attempts: u32,

    /// Run the target scan inside the tick instead of on a background worker.
    /// Byte-identical replays need this on.
    pub inline_targeting: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_seed: 1337,
            dt: DT,
            time_scale: 1.0,
            unit_cap: DEFAULT_UNIT_CAP,
            asteroid_spawning: true,
            crystal_spawning: true,
            despawn_radius: DESPAWN_RADIUS,
            spawn_min_distance: SPAWN_MIN_DISTANCE,
            spawn_max_distance: SPAWN_MAX_DISTANCE,
            spawn_safe_zone: SPAWN_SAFE_ZONE,
            spawn_attempts_per_tick: SPAWN_ATTEMPTS_PER_TICK,
            starting_energy: STARTING_ENERGY,
            max_energy: MAX_GLOBAL_ENERGY,
            energy_regen_rate: ENERGY_REGEN_RATE,
            starting_resources: STARTING_RESOURCES,
            respawn_time: RESPAWN_TIME,
            respawn_attempts: RESPAWN_ATTEMPTS,
            inline_targeting: false,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0) {
            return Err(ConfigError::Invalid {
                field: "dt",
                reason: "must be positive",
            });
        }
        if self.spawn_min_distance >= self.spawn_max_distance {
            return Err(ConfigError::Invalid {
                field: "spawn_min_distance",
                reason: "must be below spawn_max_distance",
            });
        }
        if self.unit_cap == 0 || self.unit_cap > MAX_UNITS {
            return Err(ConfigError::Invalid {
                field: "unit_cap",
                reason: "must be between 1 and the unit pool capacity",
            });
        }
        if self.max_energy < 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_energy",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
