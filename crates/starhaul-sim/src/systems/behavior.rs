//! Per-unit behavior: command interpretation, steering and weapons.
//!
//! The current command is re-read every tick and decides the unit's motion.
//! Commands whose target has vanished are dropped or converted here, never
//! ahead of time.

use rand_chacha::ChaCha8Rng;

use starhaul_core::commands::UnitCommand;
use starhaul_core::components::{Asteroid, Resource};
use starhaul_core::constants::*;
use starhaul_core::enums::{BehaviorMode, MessageLevel};
use starhaul_core::types::{Handle, Vec2};
use starhaul_targeting::scoring::{distance_to_surface, engage_range};

use crate::systems::movement::{self, gather_range, Motion};
use crate::systems::weapons::{self, Cannon};
use crate::world::World;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt: f32) {
    for (_, asteroid) in world.asteroids.iter_mut() {
        asteroid.targeted_this_frame = false;
    }

    for index in world.units.active_indices() {
        // Earlier units' blasts can kill later ones within the same pass.
        if !world.units.is_active(index) {
            continue;
        }
        tick_timers(world, index, dt);
        let motion = interpret(world, rng, index, dt);
        movement::steer(world.units.slot_mut(index), motion, dt);
        main_cannon(world, rng, index);
        if world.units.is_active(index) {
            auto_fire(world, rng, index);
        }
        if world.mothership_index() == Some(index) {
            repair_nearby(world, index, dt);
        }
    }
}

fn tick_timers(world: &mut World, index: usize, dt: f32) {
    let unit = world.units.slot_mut(index);
    let stats = unit.stats();
    unit.main_cannon_timer = (unit.main_cannon_timer - dt).max(0.0);
    for timer in &mut unit.small_cannon_timers {
        *timer = (*timer - dt).max(0.0);
    }
    unit.mining_timer = (unit.mining_timer - dt).max(0.0);
    unit.energy = (unit.energy + stats.energy_regen * dt).min(unit.max_energy);
}

/// Decide this tick's motion from the current command, advancing or
/// rewriting the queue as needed.
fn interpret(world: &mut World, rng: &mut ChaCha8Rng, index: usize, dt: f32) -> Motion {
    let unit = world.units.slot(index);
    let Some(&command) = unit.commands.current() else {
        return Motion::Hold;
    };
    let position = unit.position;

    match command {
        UnitCommand::Idle => Motion::Hold,
        UnitCommand::Move { destination } => {
            if position.distance(destination) <= ARRIVAL_DISTANCE {
                world.units.slot_mut(index).commands.advance();
                Motion::Hold
            } else {
                approach(destination)
            }
        }
        UnitCommand::Patrol { destination } => {
            if position.distance(destination) <= ARRIVAL_DISTANCE {
                world.units.slot_mut(index).commands.advance_patrol();
                Motion::Hold
            } else {
                approach(destination)
            }
        }
        UnitCommand::AttackMove { destination, target } => {
            if target.is_some_and(|t| !world.asteroids.is_live(t)) {
                set_current(world, index, UnitCommand::AttackMove { destination, target: None });
            }
            if position.distance(destination) <= ARRIVAL_DISTANCE {
                world.units.slot_mut(index).commands.advance();
                Motion::Hold
            } else {
                approach(destination)
            }
        }
        UnitCommand::Gather { resource } => gather(world, rng, index, resource, dt),
        UnitCommand::ReturnCargo { resource } => return_cargo(world, index, resource),
        UnitCommand::MainCannon { .. } => {
            world.units.slot_mut(index).commands.remove_current();
            Motion::Hold
        }
    }
}

fn approach(destination: Vec2) -> Motion {
    Motion::Approach {
        goal: destination,
        stop_distance: ARRIVAL_DISTANCE * 0.5,
    }
}

fn set_current(world: &mut World, index: usize, command: UnitCommand) {
    if let Some(current) = world.units.slot_mut(index).commands.current_mut() {
        *current = command;
    }
}

fn gather(world: &mut World, rng: &mut ChaCha8Rng, index: usize, resource: Handle<Resource>, dt: f32) -> Motion {
    let unit = world.units.slot(index);
    if unit.cargo_full() {
        set_current(world, index, UnitCommand::ReturnCargo { resource });
        return Motion::Hold;
    }

    let Some(crystal) = world.resources.resolve(resource) else {
        // Crystal is gone: haul home whatever was collected, else stop.
        if !unit.is_mothership() && unit.cargo > 0.0 {
            set_current(world, index, UnitCommand::ReturnCargo { resource });
        } else {
            world.units.slot_mut(index).commands.remove_current();
        }
        return Motion::Hold;
    };

    let stats = unit.stats();
    let target = world.resources.slot(crystal);
    let range = gather_range(stats, target);
    if unit.position.distance(target.position) > range {
        return Motion::Approach {
            goal: target.position,
            stop_distance: range,
        };
    }

    weapons::mine_crystal(world, rng, index, crystal, stats.mining_rate * dt);
    let unit = world.units.slot(index);
    let depleted = !world.resources.is_live(resource);
    if unit.cargo_full() || (depleted && unit.cargo > 0.0) {
        set_current(world, index, UnitCommand::ReturnCargo { resource });
    } else if depleted {
        world.units.slot_mut(index).commands.remove_current();
    }
    Motion::Hold
}

fn return_cargo(world: &mut World, index: usize, resource: Handle<Resource>) -> Motion {
    let unit = world.units.slot(index);
    if unit.is_mothership() || unit.max_cargo <= 0.0 {
        world.units.slot_mut(index).commands.remove_current();
        return Motion::Hold;
    }
    if unit.cargo <= 0.0 {
        // Unloaded: go back for more if the crystal is still there.
        if world.resources.is_live(resource) {
            set_current(world, index, UnitCommand::Gather { resource });
        } else {
            world.units.slot_mut(index).commands.remove_current();
        }
        return Motion::Hold;
    }
    match world.mothership() {
        Some(mothership) => Motion::Approach {
            goal: mothership.position,
            stop_distance: UNLOAD_RANGE * RETURN_STOP_FRACTION,
        },
        // Wait for the respawn.
        None => Motion::Hold,
    }
}

/// Direct main-cannon order: fire once when ready, then clear.
fn main_cannon(world: &mut World, rng: &mut ChaCha8Rng, index: usize) {
    let unit = world.units.slot(index);
    let Some(target) = unit.main_cannon_target else {
        return;
    };
    let stats = unit.stats();
    let Some(asteroid) = world.asteroids.resolve(target) else {
        world.units.slot_mut(index).main_cannon_target = None;
        return;
    };
    let rock = world.asteroids.slot(asteroid);
    if distance_to_surface(unit.position, rock.position, rock.radius) > stats.main_cannon_range {
        world.units.slot_mut(index).main_cannon_target = None;
        world.message(MessageLevel::Warning, "Main cannon target out of range");
        return;
    }
    world.asteroids.slot_mut(asteroid).targeted_this_frame = true;
    if unit.main_cannon_timer > 0.0 {
        return;
    }

    let unit = world.units.slot_mut(index);
    unit.main_cannon_timer = stats.main_cannon_cooldown;
    unit.main_cannon_target = None;
    weapons::fire(world, rng, index, asteroid, Cannon::Main);
}

/// Auto-fire is off while moving, and while gathering or hauling for
/// anything but the Mothership.
fn auto_fire_suppressed(world: &World, index: usize) -> bool {
    let unit = world.units.slot(index);
    if unit.behavior == BehaviorMode::Passive {
        return true;
    }
    match unit.commands.current() {
        Some(UnitCommand::Move { .. }) => true,
        Some(UnitCommand::Gather { .. } | UnitCommand::ReturnCargo { .. }) => !unit.is_mothership(),
        _ => false,
    }
}

fn attack_move_target(world: &World, index: usize) -> Option<Handle<Asteroid>> {
    match world.units.slot(index).commands.current() {
        Some(UnitCommand::AttackMove { target, .. }) => *target,
        _ => None,
    }
}

fn auto_fire(world: &mut World, rng: &mut ChaCha8Rng, index: usize) {
    if auto_fire_suppressed(world, index) {
        return;
    }
    let unit = world.units.slot(index);
    let stats = unit.stats();
    let Some(range) = engage_range(unit.unit_type, unit.behavior) else {
        return;
    };
    let priority = attack_move_target(world, index);

    for slot in 0..stats.small_cannons.min(SMALL_CANNON_SLOTS) {
        // A blast from an earlier shot may have killed the shooter.
        if !world.units.is_active(index) {
            return;
        }
        let unit = world.units.slot(index);
        let Some(target) = unit.small_cannon_targets[slot] else {
            continue;
        };
        let Some(asteroid) = world.asteroids.resolve(target) else {
            world.units.slot_mut(index).small_cannon_targets[slot] = None;
            continue;
        };
        let reach = if priority == Some(target) {
            stats.small_cannon_range
        } else {
            range
        };
        let rock = world.asteroids.slot(asteroid);
        if distance_to_surface(unit.position, rock.position, rock.radius) > reach {
            continue;
        }
        world.asteroids.slot_mut(asteroid).targeted_this_frame = true;
        if world.units.slot(index).small_cannon_timers[slot] > 0.0 {
            continue;
        }
        if weapons::fire(world, rng, index, asteroid, Cannon::Small) && world.units.is_active(index) {
            world.units.slot_mut(index).small_cannon_timers[slot] = stats.small_cannon_cooldown;
        }
    }
}

fn repair_nearby(world: &mut World, mothership: usize, dt: f32) {
    let origin = world.units.slot(mothership).position;
    for index in world.units.active_indices() {
        if index == mothership {
            continue;
        }
        let unit = world.units.slot(index);
        if unit.health < unit.max_health && unit.position.distance(origin) <= REPAIR_RANGE {
            weapons::repair(world, mothership, index, dt);
        }
    }
}
