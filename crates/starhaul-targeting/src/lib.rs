//! Target selection and radar scanning for Starhaul.
//!
//! Scans are pure functions over copied snapshots, so they can run on
//! background threads while the simulation keeps ticking. Suggestions flow
//! back to the main thread, which is the only place gameplay state changes.

pub mod radar;
pub mod scoring;
pub mod snapshot;
pub mod worker;

pub use starhaul_core as core;

pub use scoring::{engage_range, scan, select_target};
pub use snapshot::*;
pub use worker::{RadarWorker, TargetingWorker};
