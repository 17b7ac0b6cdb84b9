//! Visual effects: spawners used by the gameplay systems, and per-tick aging.
//!
//! Particles never affect gameplay. They do draw from the simulation RNG, so
//! spawning them is part of the deterministic sequence.

use std::f32::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::components::Particle;
use starhaul_core::constants::*;
use starhaul_core::enums::ParticleKind;
use starhaul_core::types::{direction, heading, Color, Vec2};

use crate::world::World;

/// Fraction of particle velocity shed per second.
const PARTICLE_DRAG: f32 = 1.5;

/// Age every particle by `dt` and retire expired ones.
pub fn run(world: &mut World, dt: f32) {
    let damping = (1.0 - PARTICLE_DRAG * dt).max(0.0);
    world.particles.update(|p| {
        p.life -= dt;
        if p.life <= 0.0 {
            return false;
        }
        p.position += p.velocity * dt;
        p.velocity *= damping;
        true
    });
}

#[allow(clippy::too_many_arguments)]
fn burst(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: ParticleKind,
    position: Vec2,
    count: u32,
    speed: f32,
    life: f32,
    size: f32,
    color: Color,
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(speed * 0.3..=speed);
        let life = rng.gen_range(life * 0.6..=life);
        world.particles.spawn(Particle {
            kind,
            position,
            velocity: direction(angle) * speed,
            life,
            max_life: life,
            size: rng.gen_range(size * 0.5..=size),
            color,
            target: None,
            rotation: angle,
        });
    }
}

/// Explosion whose particle count scales with `scale` (usually max health).
pub fn explosion(world: &mut World, rng: &mut ChaCha8Rng, position: Vec2, scale: f32) {
    let count = (EXPLOSION_PARTICLES_BASE + (scale / 100.0 * EXPLOSION_PARTICLES_PER_100) as u32)
        .min(EXPLOSION_PARTICLES_MAX);
    let size = (scale.sqrt() * 0.5).clamp(3.0, 30.0);
    world.particles.spawn(Particle {
        kind: ParticleKind::Glow,
        position,
        life: 0.3,
        max_life: 0.3,
        size: size * 3.0,
        color: Color::FIRE,
        ..Default::default()
    });
    burst(world, rng, ParticleKind::Spark, position, count / 2, 220.0, 0.6, size * 0.4, Color::FIRE);
    burst(world, rng, ParticleKind::Puff, position, count / 4, 60.0, 1.2, size, Color::SMOKE);
    burst(world, rng, ParticleKind::Debris, position, count - count / 2 - count / 4, 120.0, 1.5, size * 0.5, Color::ROCK);
}

/// Rock-on-rock impact at a contact point.
pub fn collision_burst(world: &mut World, rng: &mut ChaCha8Rng, position: Vec2, size: f32) {
    burst(world, rng, ParticleKind::Debris, position, 6, 90.0, 1.0, (size * 0.1).clamp(2.0, 8.0), Color::ROCK);
    burst(world, rng, ParticleKind::Spark, position, 4, 160.0, 0.4, 2.0, Color::WHITE);
}

/// Expanding ring.
pub fn shockwave(world: &mut World, position: Vec2, radius: f32, color: Color) {
    world.particles.spawn(Particle {
        kind: ParticleKind::Shockwave,
        position,
        life: 0.5,
        max_life: 0.5,
        size: radius,
        color,
        ..Default::default()
    });
}

/// Beam endpoints: from just inside the shooter's hull to just inside the target.
pub fn beam_endpoints(from: Vec2, from_radius: f32, to: Vec2, to_radius: f32) -> (Vec2, Vec2) {
    let dir = (to - from).try_normalize().unwrap_or(Vec2::X);
    let origin = from + dir * from_radius * BEAM_ORIGIN_OFFSET;
    let hit = to - dir * to_radius * BEAM_TARGET_INSET;
    (origin, hit)
}

pub fn beam(world: &mut World, kind: ParticleKind, origin: Vec2, hit: Vec2, width: f32, life: f32, color: Color) {
    world.particles.spawn(Particle {
        kind,
        position: origin,
        life,
        max_life: life,
        size: width,
        color,
        target: Some(hit),
        rotation: heading(hit - origin),
        ..Default::default()
    });
}

/// Flash at the muzzle and sparks at the impact point.
pub fn weapon_hit(world: &mut World, rng: &mut ChaCha8Rng, origin: Vec2, hit: Vec2, color: Color, heavy: bool) {
    let flash = if heavy { 14.0 } else { 6.0 };
    world.particles.spawn(Particle {
        kind: ParticleKind::Glow,
        position: origin,
        life: 0.08,
        max_life: 0.08,
        size: flash,
        color,
        ..Default::default()
    });
    let sparks = if heavy { 8 } else { 3 };
    burst(world, rng, ParticleKind::Spark, hit, sparks, 150.0, 0.3, 2.5, color);
}

pub fn mining_sparks(world: &mut World, rng: &mut ChaCha8Rng, position: Vec2) {
    burst(world, rng, ParticleKind::MiningSpark, position, 3, 80.0, 0.4, 2.0, Color::MINING);
}
