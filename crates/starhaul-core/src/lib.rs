//! Core types and definitions for the Starhaul simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity records, unit stats, commands, snapshots, events, constants and
//! runtime configuration. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;

#[cfg(test)]
mod tests;
