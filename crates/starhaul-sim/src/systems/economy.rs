//! Global energy, cargo unloading and Mothership production.

use starhaul_core::components::Unit;
use starhaul_core::constants::{UNLOAD_RANGE, UNLOAD_RATE};
use starhaul_core::enums::ProductionMode;
use starhaul_core::events::SimEvent;

use crate::world::World;

pub fn run(world: &mut World, dt: f32) {
    regenerate_energy(world, dt);
    unload_cargo(world, dt);
    produce(world, dt);
}

pub fn regenerate_energy(world: &mut World, dt: f32) {
    world.energy = (world.energy + world.config.energy_regen_rate * dt).min(world.max_energy);
}

/// Drain cargo from every unit close enough to the Mothership.
pub fn unload_cargo(world: &mut World, dt: f32) {
    let Some(mothership) = world.mothership_index() else {
        return;
    };
    let dock = world.units.slot(mothership).position;

    for index in world.units.active_indices() {
        if index == mothership {
            continue;
        }
        let unit = world.units.slot_mut(index);
        if unit.cargo <= 0.0 || unit.position.distance(dock) > UNLOAD_RANGE {
            continue;
        }
        let transfer = unit.cargo.min(UNLOAD_RATE * dt);
        unit.cargo -= transfer;
        world.resources_stored += transfer;
    }
}

/// Advance the Mothership's build.
///
/// The cost is paid once when a cycle starts. While resources are short or
/// the unit cap is reached the timer does not move.
pub fn produce(world: &mut World, dt: f32) {
    let Some(mothership) = world.mothership_index() else {
        return;
    };
    let state = world.units.slot(mothership).production;
    let Some(unit_type) = state.mode.unit_type() else {
        return;
    };
    if world.units.live_count() >= world.config.unit_cap {
        return;
    }

    let stats = unit_type.stats();
    let mut timer = state.timer;
    if timer <= 0.0 {
        if world.resources_stored < stats.production_cost {
            return;
        }
        world.resources_stored -= stats.production_cost;
    }
    timer += dt;

    if timer >= stats.build_time {
        let position = world.units.slot(mothership).position;
        match world.units.allocate(Unit::new(unit_type, position)) {
            Some(handle) => {
                timer = 0.0;
                world.events.push(SimEvent::UnitProduced {
                    unit_type,
                    slot: handle.index,
                });
                tracing::info!(?unit_type, slot = handle.index, "unit produced");
            }
            // Pool full: hold the finished build and retry next tick.
            None => timer = stats.build_time,
        }
    }
    world.units.slot_mut(mothership).production.timer = timer;
}

/// Switch production, refunding a cycle that was already paid for.
pub fn set_mode(world: &mut World, mode: ProductionMode) {
    let Some(mothership) = world.mothership_index() else {
        return;
    };
    let state = world.units.slot(mothership).production;
    if state.mode == mode {
        return;
    }
    if state.timer > 0.0 {
        if let Some(previous) = state.mode.unit_type() {
            world.resources_stored += previous.stats().production_cost;
        }
    }
    let production = &mut world.units.slot_mut(mothership).production;
    production.mode = mode;
    production.timer = 0.0;
}
