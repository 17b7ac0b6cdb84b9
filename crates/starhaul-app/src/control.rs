//! Control surface for the game loop.
//!
//! These functions bridge callers (the binary, or an embedding frontend) to
//! the game loop thread via its command channel.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use starhaul_core::commands::PlayerCommand;
use starhaul_core::config::{ConfigError, SimConfig};
use starhaul_core::state::WorldSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to start game loop: {0}")]
    Spawn(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Start the game loop unless it is already running.
pub fn start_simulation(state: &AppState, config: SimConfig) -> Result<(), AppError> {
    config.validate()?;
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;
    *tx_lock = Some(cmd_tx);
    if let Ok(mut handle_lock) = state.loop_handle.lock() {
        *handle_lock = Some(handle);
    }
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| AppError::Disconnected),
        None => Err(AppError::NotStarted),
    }
}

/// Forward a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    send(state, GameLoopCommand::PlayerCommand(command))
}

/// Ask the loop to write a save file. Failures are logged by the loop.
pub fn save_game(state: &AppState, path: impl Into<PathBuf>) -> Result<(), AppError> {
    send(state, GameLoopCommand::Save(path.into()))
}

/// Ask the loop to load a save file. A bad file leaves the running game as is.
pub fn load_game(state: &AppState, path: impl Into<PathBuf>) -> Result<(), AppError> {
    send(state, GameLoopCommand::Load(path.into()))
}

/// Latest snapshot, for polling.
pub fn get_snapshot(state: &AppState) -> Result<Option<WorldSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the loop and wait for its thread to finish.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| AppError::Poisoned)?
        .take()
        .ok_or(AppError::NotStarted)?;
    // The loop may already be gone; joining below covers both cases.
    let _ = tx.send(GameLoopCommand::Shutdown);
    drop(tx);

    let handle = state.loop_handle.lock().map_err(|_| AppError::Poisoned)?.take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            tracing::warn!("game loop thread panicked");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn quiet_config() -> SimConfig {
        SimConfig {
            asteroid_spawning: false,
            crystal_spawning: false,
            ..Default::default()
        }
    }

    fn wait_for_snapshot(state: &AppState, pred: impl Fn(&WorldSnapshot) -> bool) -> Option<WorldSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snapshot) = get_snapshot(state).unwrap() {
                if pred(&snapshot) {
                    return Some(snapshot);
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, PlayerCommand::Pause),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(stop_simulation(&state), Err(AppError::NotStarted)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let state = AppState::new();
        let config = SimConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(start_simulation(&state, config), Err(AppError::Config(_))));
        assert!(state.command_tx.lock().unwrap().is_none());
    }

    #[test]
    fn test_start_pause_stop() {
        let state = AppState::new();
        start_simulation(&state, quiet_config()).unwrap();
        assert!(matches!(
            start_simulation(&state, quiet_config()),
            Err(AppError::AlreadyRunning)
        ));

        assert!(wait_for_snapshot(&state, |s| s.time.tick > 0).is_some());
        send_command(&state, PlayerCommand::Pause).unwrap();
        let paused = wait_for_snapshot(&state, |s| s.phase == starhaul_core::enums::SimPhase::Paused)
            .expect("loop never paused");

        std::thread::sleep(Duration::from_millis(50));
        let later = get_snapshot(&state).unwrap().unwrap();
        assert_eq!(later.time.tick, paused.time.tick);

        stop_simulation(&state).unwrap();
        assert!(state.loop_handle.lock().unwrap().is_none());
        assert!(matches!(
            send_command(&state, PlayerCommand::Resume),
            Err(AppError::NotStarted)
        ));
    }
}
