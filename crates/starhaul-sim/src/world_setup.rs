//! Entity spawn factories.
//!
//! Every function here fails soft: a full pool yields `None` and nothing else
//! happens.

use std::f32::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::components::*;
use starhaul_core::config::SimConfig;
use starhaul_core::constants::*;
use starhaul_core::enums::UnitType;
use starhaul_core::types::{Handle, Vec2};

use crate::world::World;

/// A fresh world with the Mothership at the origin.
pub fn create_world(config: SimConfig) -> World {
    let mut world = World::new(config);
    if let Some(handle) = spawn_unit(&mut world, UnitType::Mothership, Vec2::ZERO) {
        world.mothership_slot = handle.slot();
    }
    world
}

pub fn spawn_unit(world: &mut World, unit_type: UnitType, position: Vec2) -> Option<Handle<Unit>> {
    world.units.allocate(Unit::new(unit_type, position))
}

/// Spawn an asteroid with random spin and texture.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Vec2,
    velocity: Vec2,
    radius: f32,
) -> Option<Handle<Asteroid>> {
    let mut asteroid = Asteroid::new(position, velocity, radius, ASTEROID_HEALTH_MULTIPLIER);
    asteroid.rotation = rng.gen_range(0.0..TAU);
    asteroid.rotation_speed =
        rng.gen_range(-ASTEROID_MAX_ROTATION_SPEED..=ASTEROID_MAX_ROTATION_SPEED);
    asteroid.texture_variant = rng.gen_range(0..ASTEROID_TEXTURE_VARIANTS);
    world.asteroids.allocate(asteroid)
}

/// Spawn a stationary crystal with random orientation and texture.
pub fn spawn_crystal(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Vec2,
    radius: f32,
) -> Option<Handle<Resource>> {
    let mut crystal = Resource::new(position, radius);
    crystal.rotation = rng.gen_range(0.0..TAU);
    crystal.texture_variant = rng.gen_range(0..CRYSTAL_TEXTURE_VARIANTS);
    world.resources.allocate(crystal)
}
