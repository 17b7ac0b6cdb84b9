//! Gravity and integration for drifting bodies.
//!
//! Asteroids feel every celestial body in the 3x3 neighborhood of their cell.
//! Crystals drift but ignore gravity. Units integrate in the movement step.

use starhaul_core::constants::*;
use starhaul_core::types::Vec2;
use starhaul_worldgen::celestial::neighborhood;

use crate::world::World;

pub fn run(world: &mut World, dt: f32) {
    let world_seed = world.config.world_seed;

    for index in world.asteroids.active_indices() {
        let asteroid = world.asteroids.slot_mut(index);
        let accel = gravity_acceleration(world_seed, asteroid.position);
        asteroid.velocity += accel * dt;
        asteroid.position += asteroid.velocity * dt;
        asteroid.rotation += asteroid.rotation_speed * dt;
    }

    for index in world.resources.active_indices() {
        let crystal = world.resources.slot_mut(index);
        crystal.position += crystal.velocity * dt;
    }
}

/// Summed inverse-square pull of nearby bodies at `position`.
///
/// Bodies closer than `GRAVITY_MIN_DISTANCE` contribute nothing.
pub fn gravity_acceleration(world_seed: u64, position: Vec2) -> Vec2 {
    neighborhood(world_seed, position)
        .filter_map(|body| {
            let offset = body.position - position;
            let distance = offset.length();
            if distance < GRAVITY_MIN_DISTANCE {
                return None;
            }
            let mut strength = GRAVITY_CONSTANT * body.radius / (distance * distance);
            if body.is_galaxy() {
                strength *= GALAXY_GRAVITY_MULTIPLIER;
            }
            Some(offset / distance * strength)
        })
        .sum()
}
