//! Damage, destruction and the beam weapons that cause them.
//!
//! Destroying an asteroid with a weapon may drop a crystal, and a dropped
//! crystal releases a blast that damages everything nearby. Kills inside a
//! blast do not drop crystals of their own, so one drop never chains into
//! another.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::components::Asteroid;
use starhaul_core::constants::*;
use starhaul_core::enums::{ParticleKind, UnitType};
use starhaul_core::events::SimEvent;
use starhaul_core::types::Color;

use crate::systems::{particles, respawn};
use crate::world::World;
use crate::world_setup;

/// Which cannon a shot comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cannon {
    Main,
    Small,
}

/// Fire `shooter`'s cannon at asteroid `target`. Returns false when the shot
/// could not be paid for.
///
/// Small cannons cost energy: the Mothership draws from the global pool,
/// every other unit from its own reserve.
pub fn fire(world: &mut World, rng: &mut ChaCha8Rng, shooter: usize, target: usize, cannon: Cannon) -> bool {
    let unit = world.units.slot(shooter);
    let stats = unit.stats();
    let (damage, cost) = match cannon {
        Cannon::Main => (stats.main_cannon_damage, 0.0),
        Cannon::Small => (stats.small_cannon_damage, stats.small_cannon_energy),
    };

    if cost > 0.0 {
        if unit.is_mothership() {
            if world.energy < cost {
                return false;
            }
            world.energy -= cost;
        } else {
            if unit.energy < cost {
                return false;
            }
            world.units.slot_mut(shooter).energy -= cost;
        }
    }

    let unit = world.units.slot(shooter);
    let asteroid = world.asteroids.slot(target);
    let (origin, hit) = particles::beam_endpoints(unit.position, unit.stats().radius, asteroid.position, asteroid.radius);
    let (color, width, heavy) = match cannon {
        Cannon::Main => (Color::MAIN_LASER, 6.0, true),
        Cannon::Small => (Color::LASER, 2.0, false),
    };
    particles::beam(world, ParticleKind::Tracer, origin, hit, width, TRACER_LIFE, color);
    particles::weapon_hit(world, rng, origin, hit, color, heavy);

    damage_asteroid(world, rng, target, damage, true);
    true
}

/// Apply `damage` to an asteroid, shrinking it. Returns true if it was destroyed.
///
/// With `may_drop` a destroyed asteroid rolls for a crystal drop.
pub fn damage_asteroid(world: &mut World, rng: &mut ChaCha8Rng, index: usize, damage: f32, may_drop: bool) -> bool {
    if !world.asteroids.is_active(index) {
        return false;
    }
    let asteroid = world.asteroids.slot_mut(index);
    asteroid.health -= damage;
    asteroid.radius -= damage / ASTEROID_HEALTH_MULTIPLIER * ASTEROID_DAMAGE_SHRINK;
    if asteroid.health > 0.0 && asteroid.radius >= ASTEROID_MIN_RADIUS {
        return false;
    }

    let dead = asteroid.clone();
    world.free_asteroid(index);
    particles::explosion(world, rng, dead.position, dead.max_health);
    if may_drop && rng.gen::<f32>() < CRYSTAL_DROP_CHANCE {
        drop_crystal(world, rng, &dead);
    }
    true
}

/// Leave a crystal where `dead` was and release its blast.
fn drop_crystal(world: &mut World, rng: &mut ChaCha8Rng, dead: &Asteroid) {
    let original_radius = dead.max_health / ASTEROID_HEALTH_MULTIPLIER;
    let radius = (original_radius * CRYSTAL_DROP_RADIUS_FRACTION).clamp(CRYSTAL_MIN_RADIUS, CRYSTAL_MAX_RADIUS);
    if world_setup::spawn_crystal(world, rng, dead.position, radius).is_none() {
        return;
    }
    world.events.push(SimEvent::CrystalDropped {
        position: dead.position,
        radius,
    });
    tracing::debug!(radius, "crystal dropped");

    let blast_radius = radius * CRYSTAL_BLAST_RADIUS_PER_RADIUS;
    let blast_damage = radius * CRYSTAL_BLAST_DAMAGE_PER_RADIUS;
    particles::shockwave(world, dead.position, blast_radius, Color::CRYSTAL_SHOCK);

    for index in world.units.active_indices() {
        let unit = world.units.slot(index);
        if unit.position.distance(dead.position) - unit.stats().radius <= blast_radius {
            damage_unit(world, rng, index, blast_damage * CRYSTAL_BLAST_UNIT_FACTOR);
        }
    }
    for index in world.asteroids.active_indices() {
        let asteroid = world.asteroids.slot(index);
        if asteroid.position.distance(dead.position) - asteroid.hitbox() <= blast_radius {
            damage_asteroid(world, rng, index, blast_damage, false);
        }
    }
}

/// Apply `damage` to a unit. Returns true if it died.
pub fn damage_unit(world: &mut World, rng: &mut ChaCha8Rng, index: usize, damage: f32) -> bool {
    if !world.units.is_active(index) {
        return false;
    }
    let unit = world.units.slot_mut(index);
    unit.health -= damage;
    if unit.health > 0.0 {
        return false;
    }
    kill_unit(world, rng, index);
    true
}

/// Explode a unit. The Mothership goes into respawn; anything else is freed.
pub fn kill_unit(world: &mut World, rng: &mut ChaCha8Rng, index: usize) {
    let unit = world.units.slot(index);
    let (position, unit_type, max_health) = (unit.position, unit.unit_type, unit.max_health);
    particles::explosion(world, rng, position, max_health);

    if unit_type == UnitType::Mothership {
        respawn::begin(world, index);
    } else {
        world.events.push(SimEvent::UnitDestroyed { unit_type, position });
        world.free_unit(index);
    }
}

/// Move up to `amount` from a crystal into the miner. Returns what was taken.
///
/// The Mothership has no hold; its yield goes straight to stored resources.
pub fn mine_crystal(world: &mut World, rng: &mut ChaCha8Rng, miner: usize, crystal: usize, amount: f32) -> f32 {
    let unit = world.units.slot(miner);
    let is_mothership = unit.is_mothership();
    let space = if is_mothership {
        f32::INFINITY
    } else {
        (unit.max_cargo - unit.cargo).max(0.0)
    };
    let (from, from_radius) = (unit.position, unit.stats().radius);

    let resource = world.resources.slot_mut(crystal);
    let taken = amount.min(resource.health).min(space);
    if taken <= 0.0 {
        return 0.0;
    }
    resource.health -= taken;
    resource.amount = (resource.amount - taken).max(0.0);
    resource.radius = (resource.radius - taken / CRYSTAL_HEALTH_MULTIPLIER * CRYSTAL_MINING_SHRINK)
        .max(CRYSTAL_MIN_VISIBLE_RADIUS);
    let (to, to_radius, depleted) = (resource.position, resource.visual_radius(), resource.health <= 0.0);

    if is_mothership {
        world.resources_stored += taken;
    } else {
        world.units.slot_mut(miner).cargo += taken;
    }

    let (origin, hit) = particles::beam_endpoints(from, from_radius, to, to_radius);
    particles::beam(world, ParticleKind::MiningStream, origin, hit, 3.0, MINING_BEAM_LIFE, Color::MINING);
    if world.units.slot(miner).mining_timer <= 0.0 {
        particles::mining_sparks(world, rng, hit);
        world.units.slot_mut(miner).mining_timer = MINING_SPARK_INTERVAL;
    }

    if depleted {
        particles::explosion(world, rng, to, 100.0);
        particles::shockwave(world, to, to_radius * 3.0, Color::CRYSTAL_SHOCK);
        world.free_resource(crystal);
    }
    taken
}

/// Heal `target` for one tick of the Mothership's repair beam.
pub fn repair(world: &mut World, healer: usize, target: usize, dt: f32) {
    let unit = world.units.slot_mut(target);
    unit.health = (unit.health + REPAIR_RATE * dt).min(unit.max_health);
    let (to, to_radius) = (unit.position, unit.stats().radius);
    let healer = world.units.slot(healer);
    let (origin, hit) = particles::beam_endpoints(healer.position, healer.stats().radius, to, to_radius);
    particles::beam(world, ParticleKind::Tracer, origin, hit, 2.0, REPAIR_BEAM_LIFE, Color::REPAIR);
}
