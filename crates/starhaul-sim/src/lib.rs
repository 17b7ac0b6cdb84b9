//! Simulation engine for Starhaul.
//!
//! Owns the entity pools, runs systems at a fixed tick rate, and produces
//! `WorldSnapshot`s for the frontend.

pub mod engine;
pub mod persistence;
pub mod pool;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use starhaul_core as core;
pub use engine::SimulationEngine;
pub use persistence::PersistenceError;
pub use world::World;
