//! Headless Starhaul shell.
//!
//! Runs the simulation engine on its own thread, feeds the background
//! targeting and radar workers, and exposes a small control surface for
//! starting the loop, sending commands and polling snapshots.

pub mod control;
pub mod game_loop;
pub mod state;

pub use starhaul_core as core;
