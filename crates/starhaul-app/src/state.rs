//! Application state shared between the control surface and the game loop thread.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use starhaul_core::commands::PlayerCommand;
use starhaul_core::state::WorldSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Write the current state to a file.
    Save(PathBuf),
    /// Replace the current state with one read from a file.
    Load(PathBuf),
    /// Stop the loop after the current tick.
    Shutdown,
}

/// Shared application state.
///
/// `command_tx` and `loop_handle` are `None` until the loop is started.
/// The latest snapshot is shared with the loop thread through an `Arc`.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            loop_handle: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.loop_handle.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
    }
}
