//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They own no state; everything lives in the world's pools and counters.

pub mod behavior;
pub mod collision;
pub mod economy;
pub mod movement;
pub mod orders;
pub mod particles;
pub mod physics;
pub mod respawn;
pub mod snapshot;
pub mod spawning;
pub mod targeting;
pub mod weapons;
