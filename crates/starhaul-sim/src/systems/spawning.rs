//! Keeps the neighborhood of the camera and every unit populated.
//!
//! Each tick: rebuild the anchor list, despawn anything far from every
//! anchor, then make a bounded number of spawn attempts in an annulus around
//! randomly chosen anchors. Asteroid spawns are thinned by the density field;
//! crystals appear only near celestial bodies.

use std::f32::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::constants::*;
use starhaul_core::types::{direction, Vec2};
use starhaul_worldgen::celestial::neighborhood;
use starhaul_worldgen::density::asteroid_density;

use crate::world::World;
use crate::world_setup;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    world.anchors = compute_anchors(world);
    despawn_distant(world);

    if world.config.asteroid_spawning {
        spawn_asteroids(world, rng);
    }
    if world.config.crystal_spawning {
        spawn_crystals(world, rng);
    }
}

/// Camera first, then live units in slot order. A unit close to an existing
/// anchor adds nothing, so a tight fleet counts once.
pub fn compute_anchors(world: &World) -> Vec<Vec2> {
    let merge_distance = world.config.despawn_radius * 0.5;
    let mut anchors = vec![world.camera];
    for (_, unit) in world.units.iter() {
        if anchors.len() >= MAX_ANCHORS {
            break;
        }
        if anchors
            .iter()
            .all(|a| a.distance(unit.position) > merge_distance)
        {
            anchors.push(unit.position);
        }
    }
    anchors
}

fn near_any_anchor(anchors: &[Vec2], position: Vec2, radius: f32) -> bool {
    let radius_sq = radius * radius;
    anchors
        .iter()
        .any(|a| a.distance_squared(position) <= radius_sq)
}

fn despawn_distant(world: &mut World) {
    let radius = world.config.despawn_radius;
    let mut despawned = 0usize;

    for index in world.asteroids.active_indices() {
        let position = world.asteroids.slot(index).position;
        if !near_any_anchor(&world.anchors, position, radius) {
            world.asteroids.free(index);
            despawned += 1;
        }
    }
    for index in world.resources.active_indices() {
        let position = world.resources.slot(index).position;
        if !near_any_anchor(&world.anchors, position, radius) {
            world.resources.free(index);
            despawned += 1;
        }
    }

    if despawned > 0 {
        tracing::debug!(despawned, "despawned distant bodies");
    }
}

/// Desired asteroid population: a base per anchor plus the local density.
pub fn asteroid_target(world_seed: u64, anchors: &[Vec2]) -> usize {
    let total: f32 = anchors
        .iter()
        .map(|&a| ASTEROID_TARGET_BASE + asteroid_density(world_seed, a) * ASTEROID_TARGET_DENSITY_SCALE)
        .sum();
    (total as usize).min(MAX_ASTEROIDS)
}

/// Uniform point in the spawn annulus around `anchor`.
fn annulus_point(world: &World, rng: &mut ChaCha8Rng, anchor: Vec2) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(world.config.spawn_min_distance..world.config.spawn_max_distance);
    anchor + direction(angle) * distance
}

/// Radius biased toward small rocks.
fn sample_spawn_radius(rng: &mut ChaCha8Rng) -> f32 {
    let u: f32 = rng.gen();
    ASTEROID_MIN_SPAWN_RADIUS + (ASTEROID_MAX_SPAWN_RADIUS - ASTEROID_MIN_SPAWN_RADIUS) * u * u * u
}

fn overlaps_asteroid(world: &World, position: Vec2, radius: f32) -> bool {
    let hitbox = radius * ASTEROID_HITBOX_MULTIPLIER;
    world.asteroids.iter().any(|(_, a)| {
        a.position.distance(position) < a.hitbox() + hitbox + SPAWN_OVERLAP_BUFFER
    })
}

fn spawn_asteroids(world: &mut World, rng: &mut ChaCha8Rng) {
    if world.anchors.is_empty() {
        return;
    }
    let target = asteroid_target(world.config.world_seed, &world.anchors);

    for _ in 0..world.config.spawn_attempts_per_tick {
        if world.asteroids.live_count() >= target {
            break;
        }
        let anchor = world.anchors[rng.gen_range(0..world.anchors.len())];
        let position = annulus_point(world, rng, anchor);
        if near_any_anchor(&world.anchors, position, world.config.spawn_safe_zone) {
            continue;
        }
        let radius = sample_spawn_radius(rng);
        if overlaps_asteroid(world, position, radius) {
            continue;
        }
        let density = asteroid_density(world.config.world_seed, position);
        if rng.gen::<f32>() >= density {
            continue;
        }
        let velocity = direction(rng.gen_range(0.0..TAU))
            * rng.gen_range(0.0..ASTEROID_MAX_SPAWN_SPEED);
        world_setup::spawn_asteroid(world, rng, position, velocity, radius);
    }
}

fn spawn_crystals(world: &mut World, rng: &mut ChaCha8Rng) {
    if world.anchors.is_empty() {
        return;
    }

    for _ in 0..CRYSTAL_SPAWN_ATTEMPTS_PER_TICK {
        if world.resources.live_count() >= MAX_CRYSTAL_TARGET {
            return;
        }
        if rng.gen::<f32>() >= CRYSTAL_SPAWN_CHANCE {
            continue;
        }
        let anchor = world.anchors[rng.gen_range(0..world.anchors.len())];
        let candidate = annulus_point(world, rng, anchor);

        // First body that passes its roll claims the candidate.
        for body in neighborhood(world.config.world_seed, candidate) {
            let chance = if body.is_galaxy() {
                CRYSTAL_GALAXY_PROBABILITY
            } else {
                CRYSTAL_PLANET_PROBABILITY * body.radius / PLANET_MAX_RADIUS
            };
            if rng.gen::<f32>() >= chance {
                continue;
            }
            let offset = direction(rng.gen_range(0.0..TAU))
                * body.radius
                * rng.gen_range(CRYSTAL_BODY_OFFSET_MIN..CRYSTAL_BODY_OFFSET_MAX);
            let position = body.position + offset;
            if position.distance(world.camera) >= CRYSTAL_CAMERA_MIN_DISTANCE
                && near_any_anchor(&world.anchors, position, world.config.despawn_radius)
            {
                let radius = rng.gen_range(CRYSTAL_MIN_RADIUS..CRYSTAL_MAX_RADIUS);
                world_setup::spawn_crystal(world, rng, position, radius);
            }
            break;
        }
    }
}
