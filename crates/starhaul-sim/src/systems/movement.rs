//! Unit steering and integration.

use starhaul_core::components::{Resource, Unit};
use starhaul_core::constants::MINING_RANGE_FACTOR;
use starhaul_core::stats::UnitStats;
use starhaul_core::types::{heading, Vec2};

/// Where a unit wants to go this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Brake to a stop.
    Hold,
    /// Head for `goal`, stopping once within `stop_distance` of it.
    Approach { goal: Vec2, stop_distance: f32 },
}

/// Distance from a crystal's center at which mining works.
///
/// Used both as the approach stop distance and as the mining range check, so
/// a unit that has stopped is always close enough to mine.
pub fn gather_range(stats: &UnitStats, resource: &Resource) -> f32 {
    stats.small_cannon_range * MINING_RANGE_FACTOR + resource.visual_radius()
}

/// Accelerate toward the motion goal (or brake), then integrate position.
pub fn steer(unit: &mut Unit, motion: Motion, dt: f32) {
    let stats = unit.stats();
    let desired = match motion {
        Motion::Approach { goal, stop_distance } => {
            let offset = goal - unit.position;
            let distance = offset.length();
            if distance > stop_distance {
                // Ease off over the last stretch so the stop lands near the edge.
                let speed = stats.speed.min((distance - stop_distance) * 2.0 + 10.0);
                Some(offset / distance * speed)
            } else {
                None
            }
        }
        Motion::Hold => None,
    };

    match desired {
        Some(velocity) => {
            let blend = (stats.acceleration * dt).min(1.0);
            unit.velocity += (velocity - unit.velocity) * blend;
        }
        None => {
            unit.velocity *= (1.0 - stats.friction * dt).max(0.0);
        }
    }

    unit.position += unit.velocity * dt;
    if unit.velocity.length_squared() > 1.0 {
        unit.rotation = heading(unit.velocity);
    }
}
