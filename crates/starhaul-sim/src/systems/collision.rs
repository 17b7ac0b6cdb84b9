//! Asteroid-asteroid and unit-asteroid collisions.
//!
//! Rock on rock: if one is much smaller it shatters and the larger survives
//! slightly diminished; otherwise both shatter. Fragments leave along the
//! reflection of the incoming velocity off the contact normal.
//!
//! Rock on unit: the asteroid is destroyed and the unit takes damage equal to
//! the asteroid's hitbox radius.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::components::Asteroid;
use starhaul_core::constants::*;
use starhaul_core::types::{direction, heading, reflect, Vec2};

use crate::systems::{particles, weapons};
use crate::world::World;
use crate::world_setup;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    asteroid_pairs(world, rng);
    units_vs_asteroids(world, rng);
}

fn asteroid_pairs(world: &mut World, rng: &mut ChaCha8Rng) {
    // Fragments spawned during the pass are not tested until next tick.
    let handles = world.asteroids.active_handles();
    for (n, &first) in handles.iter().enumerate() {
        for &second in &handles[n + 1..] {
            let Some(i) = world.asteroids.resolve(first) else {
                break;
            };
            let Some(j) = world.asteroids.resolve(second) else {
                continue;
            };
            let a = world.asteroids.slot(i);
            let b = world.asteroids.slot(j);
            if a.position.distance(b.position) < a.hitbox() + b.hitbox() {
                resolve_contact(world, rng, i, j);
            }
        }
    }
}

/// Unit normal pointing from `other` toward `body`.
fn contact_normal(body: &Asteroid, other: &Asteroid) -> Vec2 {
    (body.position - other.position)
        .try_normalize()
        .unwrap_or(Vec2::X)
}

fn resolve_contact(world: &mut World, rng: &mut ChaCha8Rng, i: usize, j: usize) {
    let a = world.asteroids.slot(i).clone();
    let b = world.asteroids.slot(j).clone();
    particles::collision_burst(world, rng, (a.position + b.position) * 0.5, (a.radius + b.radius) * 0.5);

    let ((large_index, large), (small_index, small)) = if a.radius >= b.radius {
        ((i, &a), (j, &b))
    } else {
        ((j, &b), (i, &a))
    };

    if small.radius < large.radius * COLLISION_SIZE_DISPARITY {
        let survivor = world.asteroids.slot_mut(large_index);
        survivor.radius *= COLLISION_SURVIVOR_FRACTION;
        survivor.health *= COLLISION_SURVIVOR_FRACTION;
        if survivor.radius < ASTEROID_MIN_RADIUS {
            world.free_asteroid(large_index);
        }

        world.free_asteroid(small_index);
        shatter(world, rng, small, contact_normal(small, large), true);
    } else {
        let normal = contact_normal(&a, &b);
        world.free_asteroid(i);
        world.free_asteroid(j);
        shatter(world, rng, &a, normal, false);
        shatter(world, rng, &b, -normal, false);
    }
}

/// Fragment sizes for a shattered rock of radius `radius`.
///
/// `direct` adds the half-size fragment unconditionally; above the split
/// radius it is always present and two smaller secondaries follow.
fn fragment_radii(rng: &mut ChaCha8Rng, radius: f32, direct: bool) -> Vec<f32> {
    let splits = radius > ASTEROID_SPLIT_RADIUS;
    let mut radii = Vec::with_capacity(3);
    if direct || splits {
        radii.push(radius * FRAGMENT_DIRECT_FRACTION);
    }
    if splits {
        for _ in 0..2 {
            let u: f32 = rng.gen();
            let fraction = FRAGMENT_POWER_BASE + FRAGMENT_POWER_SPAN * u.powf(FRAGMENT_POWER_EXPONENT);
            radii.push(radius * fraction);
        }
    }
    radii
}

/// Spawn fragments of `parent`, which was hit on the surface with outward
/// normal `normal`.
fn shatter(world: &mut World, rng: &mut ChaCha8Rng, parent: &Asteroid, normal: Vec2, direct: bool) {
    let radii = fragment_radii(rng, parent.radius, direct);
    if radii.is_empty() {
        return;
    }

    let incoming = parent.velocity;
    let mut launch = reflect(incoming, normal);
    if launch.dot(normal) <= 0.0 {
        // Already separating: push straight off the surface instead.
        launch = normal * launch.length();
    }
    let base_angle = if launch.length_squared() > 1e-6 {
        heading(launch)
    } else {
        heading(normal)
    };
    let speed = (incoming.length() * FRAGMENT_SPEED_FACTOR).max(FRAGMENT_MIN_SPEED);

    for (n, radius) in radii.into_iter().enumerate() {
        if radius < ASTEROID_MIN_RADIUS {
            continue;
        }
        // Secondaries fan out to either side of the launch direction.
        let spread = match n {
            0 => 0.0,
            1 => 0.5,
            _ => -0.5,
        };
        let angle = base_angle + spread + rng.gen_range(-FRAGMENT_ANGLE_JITTER..=FRAGMENT_ANGLE_JITTER);
        let dir = direction(angle);
        let position = parent.position + dir * parent.radius * 0.5;
        world_setup::spawn_asteroid(world, rng, position, dir * speed, radius);
    }
}

fn units_vs_asteroids(world: &mut World, rng: &mut ChaCha8Rng) {
    for unit_index in world.units.active_indices() {
        if !world.units.is_active(unit_index) {
            continue;
        }
        let unit = world.units.slot(unit_index);
        let (position, radius) = (unit.position, unit.stats().radius);
        let hit = world
            .asteroids
            .iter()
            .find(|(_, a)| a.position.distance(position) < radius + a.hitbox())
            .map(|(index, a)| (index, a.hitbox(), a.position, a.radius));

        let Some((index, damage, impact, scale)) = hit else {
            continue;
        };
        world.free_asteroid(index);
        particles::explosion(world, rng, impact, scale);
        weapons::damage_unit(world, rng, unit_index, damage);
    }
}
