//! Minimap radar scan. Informational only.

use starhaul_core::types::Vec2;

use crate::snapshot::RadarInput;

/// Positions of every asteroid whose surface lies within radar range.
pub fn scan_radar(input: &RadarInput) -> Vec<Vec2> {
    input
        .asteroids
        .iter()
        .filter(|a| a.position.distance(input.center) - a.radius <= input.range)
        .map(|a| a.position)
        .collect()
}
