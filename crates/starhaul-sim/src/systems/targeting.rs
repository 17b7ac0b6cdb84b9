//! Bridge between the world and the targeting/radar scans.
//!
//! Snapshots are copies, so a scan may run on another thread while the world
//! keeps changing. Results are applied here on the simulation thread, and
//! handles that no longer resolve are skipped.

use starhaul_core::commands::UnitCommand;
use starhaul_core::constants::{RADAR_RANGE, SMALL_CANNON_SLOTS};
use starhaul_targeting::scoring::scan;
use starhaul_targeting::snapshot::*;

use crate::world::World;

pub fn build_snapshot(world: &World) -> TargetingSnapshot {
    let units = world
        .units
        .iter()
        .filter_map(|(index, unit)| {
            let handle = world.units.handle(index)?;
            let attack_target = match unit.commands.current() {
                Some(UnitCommand::AttackMove { target, .. }) => *target,
                _ => None,
            };
            Some(UnitProbe {
                unit: handle,
                unit_type: unit.unit_type,
                position: unit.position,
                behavior: unit.behavior,
                attack_target,
                previous_target: unit.small_cannon_targets[0],
            })
        })
        .collect();

    TargetingSnapshot {
        tick: world.tick,
        units,
        asteroids: asteroid_probes(world),
    }
}

fn asteroid_probes(world: &World) -> Vec<AsteroidProbe> {
    world
        .asteroids
        .iter()
        .filter_map(|(index, a)| {
            Some(AsteroidProbe {
                asteroid: world.asteroids.handle(index)?,
                position: a.position,
                radius: a.radius,
            })
        })
        .collect()
}

/// Write suggestions into every cannon slot of their units.
pub fn apply(world: &mut World, suggestions: &TargetSuggestions) {
    for suggestion in &suggestions.suggestions {
        let Some(unit) = world.units.get_mut(suggestion.unit) else {
            continue;
        };
        unit.small_cannon_targets = [suggestion.target; SMALL_CANNON_SLOTS];
    }
}

/// Scan and apply on the calling thread.
pub fn run_inline(world: &mut World) {
    let suggestions = scan(&build_snapshot(world));
    apply(world, &suggestions);
}

/// Radar input centered on the Mothership, if it is alive.
pub fn radar_input(world: &World) -> Option<RadarInput> {
    let center = world.mothership()?.position;
    Some(RadarInput {
        center,
        range: RADAR_RANGE,
        asteroids: asteroid_probes(world),
    })
}
