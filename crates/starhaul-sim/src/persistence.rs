//! Save and restore of the simulation state.
//!
//! Layout: a fixed 20-byte little-endian header (magic, version and the three
//! pool capacities) followed by a `bincode` body. Only durable state is
//! stored; particles, selection, targets, radar contacts, messages and events
//! start empty after a load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use starhaul_core::components::{Asteroid, Resource, Unit};
use starhaul_core::config::SimConfig;
use starhaul_core::types::{SimTime, Vec2};

use crate::pool::Pool;
use crate::world::{MothershipDown, World};

/// "SHL1".
pub const SAVE_MAGIC: u32 = 0x5348_4C31;
pub const SAVE_VERSION: u32 = 1;
const HEADER_LEN: usize = 20;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("not a save blob (magic {found:#010x})")]
    BadMagic { found: u32 },
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("{pool} capacity mismatch: save has {found}, engine has {expected}")]
    CapacityMismatch {
        pool: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("save blob truncated")]
    Truncated,
    #[error("inconsistent save body: {0}")]
    Corrupt(&'static str),
    #[error("save codec error: {0}")]
    Codec(#[from] bincode::Error),
}

#[derive(Serialize, Deserialize)]
struct SaveBody {
    time: SimTime,
    world_seed: u64,
    energy: f32,
    max_energy: f32,
    resources_stored: f32,
    camera: Vec2,
    mothership_slot: usize,
    mothership_down: Option<MothershipDown>,
    units: Pool<Unit>,
    asteroids: Pool<Asteroid>,
    resources: Pool<Resource>,
}

pub fn encode(world: &World, time: SimTime) -> Result<Vec<u8>, PersistenceError> {
    let body = SaveBody {
        time,
        world_seed: world.config.world_seed,
        energy: world.energy,
        max_energy: world.max_energy,
        resources_stored: world.resources_stored,
        camera: world.camera,
        mothership_slot: world.mothership_slot,
        mothership_down: world.mothership_down,
        units: world.units.clone(),
        asteroids: world.asteroids.clone(),
        resources: world.resources.clone(),
    };

    let mut bytes = Vec::with_capacity(HEADER_LEN);
    for field in [
        SAVE_MAGIC,
        SAVE_VERSION,
        world.units.capacity() as u32,
        world.asteroids.capacity() as u32,
        world.resources.capacity() as u32,
    ] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    bytes.extend(bincode::serialize(&body)?);
    Ok(bytes)
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, PersistenceError> {
    let raw: [u8; 4] = bytes
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or(PersistenceError::Truncated)?;
    Ok(u32::from_le_bytes(raw))
}

fn check_capacity(pool: &'static str, expected: usize, found: usize) -> Result<(), PersistenceError> {
    if expected == found {
        Ok(())
    } else {
        Err(PersistenceError::CapacityMismatch {
            pool,
            expected,
            found,
        })
    }
}

/// Decode a blob into a fresh world built on `config`. Nothing is touched on
/// failure.
pub fn decode(bytes: &[u8], config: SimConfig) -> Result<(World, SimTime), PersistenceError> {
    if bytes.len() < HEADER_LEN {
        return Err(PersistenceError::Truncated);
    }
    let magic = read_u32(bytes, 0)?;
    if magic != SAVE_MAGIC {
        return Err(PersistenceError::BadMagic { found: magic });
    }
    let version = read_u32(bytes, 4)?;
    if version != SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            expected: SAVE_VERSION,
        });
    }

    let mut world = World::new(config);
    check_capacity("unit", world.units.capacity(), read_u32(bytes, 8)? as usize)?;
    check_capacity("asteroid", world.asteroids.capacity(), read_u32(bytes, 12)? as usize)?;
    check_capacity("crystal", world.resources.capacity(), read_u32(bytes, 16)? as usize)?;

    let mut body: SaveBody = bincode::deserialize(&bytes[HEADER_LEN..])?;
    if !body.units.is_well_formed() || !body.asteroids.is_well_formed() || !body.resources.is_well_formed() {
        return Err(PersistenceError::Corrupt("pool arrays differ in length"));
    }
    check_capacity("unit", world.units.capacity(), body.units.capacity())?;
    check_capacity("asteroid", world.asteroids.capacity(), body.asteroids.capacity())?;
    check_capacity("crystal", world.resources.capacity(), body.resources.capacity())?;
    if body.mothership_slot >= body.units.capacity() {
        return Err(PersistenceError::Corrupt("mothership slot out of range"));
    }
    let slot = body.mothership_slot;
    let holds_mothership = body.units.is_active(slot) || body.units.is_reserved(slot);
    if holds_mothership && !body.units.slot(slot).is_mothership() {
        return Err(PersistenceError::Corrupt("mothership slot holds another unit"));
    }
    if (0..body.units.capacity()).any(|i| !body.units.slot(i).commands.is_well_formed()) {
        return Err(PersistenceError::Corrupt("command queue out of bounds"));
    }

    body.units.recount();
    body.asteroids.recount();
    body.resources.recount();
    for (_, unit) in body.units.iter_mut() {
        relink_unit(unit);
    }

    world.config.world_seed = body.world_seed;
    world.energy = body.energy;
    world.max_energy = body.max_energy;
    world.resources_stored = body.resources_stored;
    world.camera = body.camera;
    world.mothership_slot = body.mothership_slot;
    world.mothership_down = body.mothership_down;
    world.units = body.units;
    world.asteroids = body.asteroids;
    world.resources = body.resources;
    world.tick = body.time.tick;
    Ok((world, body.time))
}

/// Re-derive per-type maxima and drop transient targeting state.
fn relink_unit(unit: &mut Unit) {
    let stats = unit.stats();
    unit.max_health = stats.max_health;
    unit.max_energy = stats.max_energy;
    unit.max_cargo = stats.max_cargo;
    unit.health = unit.health.min(unit.max_health);
    unit.energy = unit.energy.clamp(0.0, unit.max_energy);
    unit.cargo = unit.cargo.clamp(0.0, unit.max_cargo);
    unit.small_cannon_targets = Default::default();
}
