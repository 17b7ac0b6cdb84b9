//! Procedural world generation for Starhaul.
//!
//! Stateless oracles mapping grid cells to celestial bodies and positions to
//! asteroid spawn density. Safe to call from any thread without locking.

pub use starhaul_core as core;

pub mod celestial;
pub mod density;
pub mod noise;

// Re-export key items for convenience.
pub use celestial::{celestial_body, cell_of, neighborhood, BodyKind, CelestialBody};
pub use density::asteroid_density;
