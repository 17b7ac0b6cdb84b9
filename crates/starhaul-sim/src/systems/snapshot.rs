//! Snapshot system: builds the read-only `WorldSnapshot` after each tick.
//!
//! Drains the per-tick message and event buffers; otherwise read-only.

use starhaul_core::enums::SimPhase;
use starhaul_core::state::*;
use starhaul_core::types::SimTime;

use crate::world::World;

pub fn build_snapshot(world: &mut World, time: SimTime, phase: SimPhase) -> WorldSnapshot {
    WorldSnapshot {
        time,
        phase,
        camera: world.camera,
        economy: EconomyView {
            energy: world.energy,
            max_energy: world.max_energy,
            resources_stored: world.resources_stored,
            unit_count: world.units.live_count(),
            asteroid_count: world.asteroids.live_count(),
            resource_count: world.resources.live_count(),
        },
        units: build_units(world),
        asteroids: build_asteroids(world),
        resources: build_resources(world),
        particles: build_particles(world),
        radar_contacts: world.radar_contacts.clone(),
        respawn_remaining: world.mothership_down.map(|d| d.remaining.max(0.0)),
        messages: std::mem::take(&mut world.messages),
        events: std::mem::take(&mut world.events),
    }
}

fn build_units(world: &World) -> Vec<UnitView> {
    world
        .units
        .iter()
        .map(|(index, unit)| {
            let build_time = unit
                .production
                .mode
                .unit_type()
                .map(|t| t.stats().build_time)
                .unwrap_or(0.0);
            let production_progress = if build_time > 0.0 {
                (unit.production.timer / build_time).clamp(0.0, 1.0)
            } else {
                0.0
            };
            UnitView {
                slot: index as u32,
                generation: world.units.handle(index).map(|h| h.generation).unwrap_or(0),
                unit_type: unit.unit_type,
                position: unit.position,
                rotation: unit.rotation,
                health: unit.health,
                max_health: unit.max_health,
                energy: unit.energy,
                cargo: unit.cargo,
                behavior: unit.behavior,
                current_command: unit.commands.current().copied().unwrap_or_default(),
                selected: world.is_selected(index),
                production: unit.production.mode,
                production_progress,
            }
        })
        .collect()
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    world
        .asteroids
        .iter()
        .map(|(index, a)| AsteroidView {
            slot: index as u32,
            position: a.position,
            rotation: a.rotation,
            radius: a.radius,
            health_fraction: if a.max_health > 0.0 {
                (a.health / a.max_health).clamp(0.0, 1.0)
            } else {
                0.0
            },
            targeted: a.targeted_this_frame,
            texture_variant: a.texture_variant,
        })
        .collect()
}

fn build_resources(world: &World) -> Vec<ResourceView> {
    world
        .resources
        .iter()
        .map(|(index, r)| ResourceView {
            slot: index as u32,
            position: r.position,
            rotation: r.rotation,
            radius: r.radius,
            amount: r.amount,
            texture_variant: r.texture_variant,
        })
        .collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    world
        .particles
        .iter()
        .map(|p| ParticleView {
            kind: p.kind,
            position: p.position,
            target: p.target,
            size: p.size,
            color: p.color,
            life_fraction: if p.max_life > 0.0 {
                (p.life / p.max_life).clamp(0.0, 1.0)
            } else {
                0.0
            },
            rotation: p.rotation,
        })
        .collect()
}
