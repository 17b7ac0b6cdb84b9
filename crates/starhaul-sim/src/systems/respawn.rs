//! Mothership destruction and delayed respawn.
//!
//! The Mothership's slot is reserved while it is down so nothing else can be
//! allocated into it. After `respawn_time` seconds it returns at full health
//! near where it died.

use std::f32::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::components::Unit;
use starhaul_core::constants::*;
use starhaul_core::enums::{MessageLevel, UnitType};
use starhaul_core::events::SimEvent;
use starhaul_core::types::{direction, Vec2};

use crate::world::{MothershipDown, World};

/// Take the Mothership out of play and start the respawn timer.
pub fn begin(world: &mut World, index: usize) {
    let position = world.units.slot(index).position;
    if let Some(handle) = world.units.handle(index) {
        world.selection.retain(|&h| h != handle);
    }
    if !world.units.free_reserved(index) {
        return;
    }
    world.mothership_down = Some(MothershipDown {
        remaining: world.config.respawn_time,
        position,
    });
    world.events.push(SimEvent::MothershipDestroyed { position });
    world.message(MessageLevel::Warning, "Mothership destroyed");
    tracing::info!(x = position.x, y = position.y, "mothership destroyed");
}

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt: f32) {
    let Some(mut down) = world.mothership_down else {
        return;
    };
    down.remaining -= dt;
    if down.remaining > 0.0 {
        world.mothership_down = Some(down);
        return;
    }

    let position = find_respawn_position(world, rng, down.position);
    let slot = world.mothership_slot;
    if world
        .units
        .restore(slot, Unit::new(UnitType::Mothership, position))
        .is_none()
    {
        tracing::warn!(slot, "mothership slot was not reserved; respawn skipped");
    }
    world.mothership_down = None;
    world.energy = world.max_energy;
    world.events.push(SimEvent::MothershipRespawned { position });
    world.message(MessageLevel::Info, "Mothership rebuilt");
    tracing::info!(x = position.x, y = position.y, "mothership respawned");
}

fn is_clear(world: &World, position: Vec2) -> bool {
    let radius = UnitType::Mothership.stats().radius;
    world
        .asteroids
        .iter()
        .all(|(_, a)| a.position.distance(position) >= a.hitbox() + radius + RESPAWN_BUFFER)
}

/// A spot clear of asteroids near `origin`. When every attempt is blocked
/// the last sample is used anyway.
pub fn find_respawn_position(world: &World, rng: &mut ChaCha8Rng, origin: Vec2) -> Vec2 {
    let mut candidate = origin;
    for _ in 0..world.config.respawn_attempts {
        candidate =
            origin + direction(rng.gen_range(0.0..TAU)) * rng.gen_range(0.0..RESPAWN_SCATTER);
        if is_clear(world, candidate) {
            break;
        }
    }
    candidate
}
