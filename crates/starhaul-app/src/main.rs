//! Headless Starhaul runner.
//!
//! Usage: `starhaul [config.toml]`
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `LOG_FORMAT=json`: structured JSON logs
//! - `STARHAUL_RUN_SECS`: wall-clock seconds to run (default 10)
//! - `STARHAUL_SAVE`: write a save file here before exiting
//! - `STARHAUL_LOAD`: load this save file on startup

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use starhaul_app::control::{self, AppError};
use starhaul_app::state::AppState;
use starhaul_core::config::SimConfig;

const DEFAULT_RUN_SECS: u64 = 10;
const STATUS_INTERVAL: Duration = Duration::from_secs(1);

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn load_config() -> Result<SimConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = SimConfig::load(&path)?;
            tracing::info!(%path, "config loaded");
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}

fn run_duration() -> Duration {
    let secs = std::env::var("STARHAUL_RUN_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RUN_SECS);
    Duration::from_secs(secs)
}

fn log_status(state: &AppState) {
    let Ok(Some(snapshot)) = control::get_snapshot(state) else {
        return;
    };
    let economy = &snapshot.economy;
    tracing::info!(
        tick = snapshot.time.tick,
        units = economy.unit_count,
        asteroids = economy.asteroid_count,
        crystals = economy.resource_count,
        energy = economy.energy,
        resources = economy.resources_stored,
        "status"
    );
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    let state = AppState::new();
    control::start_simulation(&state, config)?;

    if let Ok(path) = std::env::var("STARHAUL_LOAD") {
        control::load_game(&state, path)?;
    }

    let deadline = Instant::now() + run_duration();
    while Instant::now() < deadline {
        thread::sleep(STATUS_INTERVAL.min(deadline.saturating_duration_since(Instant::now())));
        log_status(&state);
    }

    if let Ok(path) = std::env::var("STARHAUL_SAVE") {
        control::save_game(&state, path)?;
    }
    control::stop_simulation(&state)
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "starhaul exited with an error");
            ExitCode::FAILURE
        }
    }
}
