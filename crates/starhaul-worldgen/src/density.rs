//! Continuous asteroid spawn-density field.

use glam::Vec2;

use starhaul_core::constants::*;

use crate::celestial::neighborhood;
use crate::noise::{perlin01, value_noise, voronoi};

/// Spawn density at `position`, in [0, 1].
///
/// Broad value noise sets regional richness, Perlin detail breaks it up,
/// Voronoi cell edges form belts, and nearby celestial bodies add a boost
/// that falls off linearly with distance.
pub fn asteroid_density(world_seed: u64, position: Vec2) -> f32 {
    let broad = value_noise(position * DENSITY_NOISE_SCALE, world_seed);
    let detail = perlin01(position * DENSITY_DETAIL_SCALE, world_seed ^ 0xA5A5);
    let (f1, f2) = voronoi(position * DENSITY_BELT_SCALE, world_seed ^ 0x5A5A);
    let belt = (1.0 - (f2 - f1) * 4.0).clamp(0.0, 1.0);

    let field = broad * 0.6 + detail * 0.4;
    let mut density = DENSITY_BASELINE + field * field * 0.6 + belt * 0.25;

    for body in neighborhood(world_seed, position) {
        let (reach, boost) = if body.is_galaxy() {
            (body.radius * DENSITY_GALAXY_REACH, DENSITY_GALAXY_BOOST)
        } else {
            (body.radius * DENSITY_PLANET_REACH, DENSITY_PLANET_BOOST)
        };
        let dist = body.position.distance(position);
        if dist < reach {
            density += (1.0 - dist / reach) * boost;
        }
    }

    density.clamp(0.0, 1.0)
}
