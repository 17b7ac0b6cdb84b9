//! Sparse celestial-body grid.
//!
//! Space is cut into square cells of `CELESTIAL_CELL_SIZE`. Each cell holds at
//! most one body, decided purely from the cell coordinates and the world seed.

use glam::Vec2;

use starhaul_core::constants::*;

use crate::noise::hash01;

/// Planets are common; galaxies are rare and much heavier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Planet,
    Galaxy,
}

/// A body found in some grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub cell: (i32, i32),
    pub position: Vec2,
    /// Uniform in [0, 1); above `GALAXY_TYPE_THRESHOLD` the body is a galaxy.
    pub type_seed: f32,
    pub radius: f32,
}

impl CelestialBody {
    pub fn kind(&self) -> BodyKind {
        if self.type_seed > GALAXY_TYPE_THRESHOLD {
            BodyKind::Galaxy
        } else {
            BodyKind::Planet
        }
    }

    pub fn is_galaxy(&self) -> bool {
        self.kind() == BodyKind::Galaxy
    }
}

/// Body in cell `(cell_x, cell_y)`, if that cell is occupied.
pub fn celestial_body(world_seed: u64, cell_x: i32, cell_y: i32) -> Option<CelestialBody> {
    if hash01(cell_x, cell_y, world_seed, 10) >= CELESTIAL_OCCUPANCY {
        return None;
    }

    let span = 1.0 - 2.0 * CELESTIAL_CELL_MARGIN;
    let fx = CELESTIAL_CELL_MARGIN + hash01(cell_x, cell_y, world_seed, 11) * span;
    let fy = CELESTIAL_CELL_MARGIN + hash01(cell_x, cell_y, world_seed, 12) * span;
    let position = Vec2::new(
        (cell_x as f32 + fx) * CELESTIAL_CELL_SIZE,
        (cell_y as f32 + fy) * CELESTIAL_CELL_SIZE,
    );

    let type_seed = hash01(cell_x, cell_y, world_seed, 13);
    let size = hash01(cell_x, cell_y, world_seed, 14);
    let radius = if type_seed > GALAXY_TYPE_THRESHOLD {
        GALAXY_MIN_RADIUS + size * (GALAXY_MAX_RADIUS - GALAXY_MIN_RADIUS)
    } else {
        PLANET_MIN_RADIUS + size * (PLANET_MAX_RADIUS - PLANET_MIN_RADIUS)
    };

    Some(CelestialBody {
        cell: (cell_x, cell_y),
        position,
        type_seed,
        radius,
    })
}

/// Grid cell containing a world position.
pub fn cell_of(position: Vec2) -> (i32, i32) {
    (
        (position.x / CELESTIAL_CELL_SIZE).floor() as i32,
        (position.y / CELESTIAL_CELL_SIZE).floor() as i32,
    )
}

/// Bodies in the 3x3 block of cells around `position`, row by row.
pub fn neighborhood(world_seed: u64, position: Vec2) -> impl Iterator<Item = CelestialBody> {
    let (cx, cy) = cell_of(position);
    (-1..=1).flat_map(move |dy| {
        (-1..=1).filter_map(move |dx| celestial_body(world_seed, cx + dx, cy + dy))
    })
}
