//! Applies player orders to the selected units.
//!
//! Orders that cannot be carried out are rejected with a UI message rather
//! than an error; the rest of the selection still receives the order.

use starhaul_core::commands::UnitCommand;
use starhaul_core::components::Unit;
use starhaul_core::enums::{BehaviorMode, MessageLevel, ProductionMode};
use starhaul_core::types::Handle;

use crate::systems::economy;
use crate::world::World;

/// Replace the selection with the handles that resolve.
pub fn select(world: &mut World, units: Vec<Handle<Unit>>) {
    let mut selection: Vec<Handle<Unit>> = Vec::with_capacity(units.len());
    for handle in units {
        if world.units.is_live(handle) && !selection.contains(&handle) {
            selection.push(handle);
        }
    }
    world.selection = selection;
}

/// Issue `command` to each selected unit, replacing or appending.
pub fn schedule(world: &mut World, command: UnitCommand, queued: bool) {
    for index in world.selected_indices() {
        schedule_for(world, index, command, queued);
    }
}

/// Issue `command` to one unit.
pub fn schedule_for(world: &mut World, index: usize, command: UnitCommand, queued: bool) {
    if let Err(reason) = validate(world, index, command) {
        world.message(MessageLevel::Warning, reason);
        return;
    }

    let unit = world.units.slot_mut(index);
    match command {
        UnitCommand::MainCannon { target } => {
            unit.main_cannon_target = Some(target);
        }
        UnitCommand::Idle => {
            if !queued {
                unit.commands.clear();
            }
        }
        UnitCommand::Patrol { .. } if !queued => {
            // Loop between where the unit is now and the new waypoint.
            let here = UnitCommand::Patrol {
                destination: unit.position,
            };
            unit.commands.replace_many(&[here, command], 1);
        }
        _ if queued => {
            if !unit.commands.push(command) {
                world.message(MessageLevel::Warning, "Command queue full");
            }
        }
        _ => unit.commands.replace(command),
    }
}

fn validate(world: &World, index: usize, command: UnitCommand) -> Result<(), &'static str> {
    let unit = world.units.slot(index);
    let stats = unit.stats();
    match command {
        UnitCommand::MainCannon { target } => {
            if !stats.has_main_cannon() {
                return Err("This unit has no main cannon");
            }
            if unit.main_cannon_timer > 0.0 {
                return Err("Main cannon is recharging");
            }
            if !world.asteroids.is_live(target) {
                return Err("Target no longer exists");
            }
        }
        UnitCommand::Gather { resource } => {
            if !stats.can_mine() {
                return Err("This unit cannot gather");
            }
            if unit.cargo_full() {
                return Err("Cargo hold is full");
            }
            if !world.resources.is_live(resource) {
                return Err("Crystal no longer exists");
            }
        }
        UnitCommand::ReturnCargo { .. } => {
            if unit.is_mothership() || unit.max_cargo <= 0.0 {
                return Err("This unit carries no cargo");
            }
        }
        UnitCommand::AttackMove {
            target: Some(target),
            ..
        } => {
            if !world.asteroids.is_live(target) {
                return Err("Target no longer exists");
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn set_behavior(world: &mut World, mode: BehaviorMode) {
    for index in world.selected_indices() {
        let unit = world.units.slot_mut(index);
        unit.behavior = mode;
        if mode == BehaviorMode::Passive {
            unit.small_cannon_targets = Default::default();
        }
    }
}

/// Only honored when the Mothership is part of the selection.
pub fn set_production(world: &mut World, mode: ProductionMode) {
    let Some(mothership) = world.mothership_index() else {
        world.message(MessageLevel::Warning, "Mothership is down");
        return;
    };
    if !world.selected_indices().contains(&mothership) {
        world.message(MessageLevel::Warning, "Select the Mothership to change production");
        return;
    }
    economy::set_mode(world, mode);
}
