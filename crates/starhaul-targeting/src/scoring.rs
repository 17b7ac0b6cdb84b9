//! Automatic small-cannon target selection.
//!
//! Pure functions over a [`TargetingSnapshot`]. The same range rules are used
//! by the simulation when it decides whether a suggested target may be fired
//! on, so a suggestion is never out of reach by construction.

use starhaul_core::components::Asteroid;
use starhaul_core::constants::{DEFENSIVE_RANGE_FACTOR, TARGET_RADIUS_WEIGHT, TARGET_STICKINESS};
use starhaul_core::enums::{BehaviorMode, UnitType};
use starhaul_core::types::{Handle, Vec2};

use crate::snapshot::*;

/// Auto-engagement range for a unit in `mode`, or `None` if it never auto-fires.
pub fn engage_range(unit_type: UnitType, mode: BehaviorMode) -> Option<f32> {
    let range = unit_type.stats().small_cannon_range;
    match mode {
        BehaviorMode::Passive => None,
        BehaviorMode::HoldGround if unit_type == UnitType::Miner => None,
        BehaviorMode::HoldGround | BehaviorMode::Offensive => Some(range),
        BehaviorMode::Defensive => Some(range * DEFENSIVE_RANGE_FACTOR),
    }
}

/// Distance from `from` to the surface of a circle.
pub fn distance_to_surface(from: Vec2, center: Vec2, radius: f32) -> f32 {
    from.distance(center) - radius
}

/// Lower is better: prefers close targets, and large ones among equals.
pub fn target_score(from: Vec2, asteroid: &AsteroidProbe) -> f32 {
    distance_to_surface(from, asteroid.position, asteroid.radius)
        - asteroid.radius * TARGET_RADIUS_WEIGHT
}

/// Pick the best asteroid for one unit.
pub fn select_target(unit: &UnitProbe, asteroids: &[AsteroidProbe]) -> Option<Handle<Asteroid>> {
    let range = engage_range(unit.unit_type, unit.behavior)?;

    if let Some(priority) = unit.attack_target {
        let full_range = unit.unit_type.stats().small_cannon_range;
        let in_reach = asteroids.iter().any(|a| {
            a.asteroid == priority
                && distance_to_surface(unit.position, a.position, a.radius) <= full_range
        });
        if in_reach {
            return Some(priority);
        }
    }

    let mut best: Option<(f32, Handle<Asteroid>)> = None;
    for asteroid in asteroids {
        if distance_to_surface(unit.position, asteroid.position, asteroid.radius) > range {
            continue;
        }
        let mut score = target_score(unit.position, asteroid);
        if unit.previous_target == Some(asteroid.asteroid) {
            score -= score.abs() * TARGET_STICKINESS;
        }
        match best {
            Some((best_score, _)) if best_score <= score => {}
            _ => best = Some((score, asteroid.asteroid)),
        }
    }
    best.map(|(_, handle)| handle)
}

/// Run a full scan over every unit in the snapshot that auto-engages.
pub fn scan(snapshot: &TargetingSnapshot) -> TargetSuggestions {
    let suggestions = snapshot
        .units
        .iter()
        .filter(|u| engage_range(u.unit_type, u.behavior).is_some())
        .map(|u| TargetSuggestion {
            unit: u.unit,
            target: select_target(u, &snapshot.asteroids),
        })
        .collect();

    TargetSuggestions {
        tick: snapshot.tick,
        suggestions,
    }
}
