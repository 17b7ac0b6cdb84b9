//! Game loop thread: runs the simulation engine at the fixed tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread, so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. When inline targeting is off
//! the loop trades snapshots and suggestions with the targeting worker each
//! tick; the radar worker is asked for a fresh contact list every
//! `RADAR_INTERVAL_FRAMES` frames.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use starhaul_core::config::SimConfig;
use starhaul_core::constants::TICK_RATE;
use starhaul_core::state::WorldSnapshot;
use starhaul_sim::engine::SimulationEngine;
use starhaul_targeting::worker::{RadarWorker, TargetingWorker};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Frames between radar requests.
const RADAR_INTERVAL_FRAMES: u64 = 30;

/// How often the radar worker checks for a request.
const RADAR_POLL_PERIOD: Duration = Duration::from_millis(50);

/// Background workers owned by the loop. Dropping them joins their threads.
struct Workers {
    targeting: Option<TargetingWorker>,
    radar: RadarWorker,
}

impl Workers {
    fn spawn(config: &SimConfig) -> io::Result<Self> {
        let targeting = if config.inline_targeting {
            None
        } else {
            Some(TargetingWorker::spawn()?)
        };
        Ok(Self {
            targeting,
            radar: RadarWorker::spawn(RADAR_POLL_PERIOD)?,
        })
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread's join handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let workers = Workers::spawn(&config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = thread::Builder::new()
        .name("starhaul-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(config);
            run_game_loop(&mut engine, &cmd_rx, &latest_snapshot, &workers);
        })?;

    Ok((cmd_tx, handle))
}

/// Whether the loop keeps going after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
    workers: &Workers,
) {
    let mut next_tick_time = Instant::now();
    let mut frame: u64 = 0;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    if handle_command(engine, command) == Flow::Stop {
                        tracing::info!(tick = engine.time().tick, "game loop stopped");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("command channel disconnected; stopping game loop");
                    return;
                }
            }
        }

        // 2. Trade with the workers and advance one tick
        let snapshot = step(engine, workers, frame);
        frame += 1;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = tick_duration(engine.time_scale());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock length of one tick at `time_scale`. Zero or negative scales
/// keep the nominal pace.
fn tick_duration(time_scale: f32) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale as f64)
    } else {
        TICK_DURATION
    }
}

fn handle_command(engine: &mut SimulationEngine, command: GameLoopCommand) -> Flow {
    match command {
        GameLoopCommand::PlayerCommand(command) => engine.queue_command(command),
        GameLoopCommand::Save(path) => save_to(engine, &path),
        GameLoopCommand::Load(path) => load_from(engine, &path),
        GameLoopCommand::Shutdown => return Flow::Stop,
    }
    Flow::Continue
}

fn save_to(engine: &SimulationEngine, path: &Path) {
    let bytes = match engine.save_state() {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode save");
            return;
        }
    };
    if let Err(err) = fs::write(path, &bytes) {
        tracing::warn!(error = %err, path = %path.display(), "failed to write save");
    }
}

fn load_from(engine: &mut SimulationEngine, path: &Path) {
    match fs::read(path) {
        // The engine logs rejected blobs itself.
        Ok(bytes) => {
            let _ = engine.load_state(&bytes);
        }
        Err(err) => tracing::warn!(error = %err, path = %path.display(), "failed to read save"),
    }
}

/// Apply finished worker output, hand the workers fresh input, then tick.
fn step(engine: &mut SimulationEngine, workers: &Workers, frame: u64) -> WorldSnapshot {
    if let Some(targeting) = &workers.targeting {
        if let Some(suggestions) = targeting.latest() {
            engine.apply_target_suggestions(&suggestions);
        }
        targeting.submit(engine.targeting_snapshot());
    }

    if let Some(contacts) = workers.radar.take_ready() {
        engine.set_radar_contacts(contacts);
    }
    if frame % RADAR_INTERVAL_FRAMES == 0 {
        if let Some(input) = engine.radar_input() {
            workers.radar.request(input);
        }
    }

    engine.tick()
}

#[cfg(test)]
mod tests {
    use super::*;
    use starhaul_core::commands::PlayerCommand;
    use starhaul_core::enums::SimPhase;

    fn quiet_config() -> SimConfig {
        SimConfig {
            asteroid_spawning: false,
            crystal_spawning: false,
            ..Default::default()
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("starhaul-{}-{}.sav", name, std::process::id()))
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Resume))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Resume)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_tick_duration_scales() {
        assert_eq!(tick_duration(1.0), TICK_DURATION);
        assert_eq!(tick_duration(2.0), TICK_DURATION.div_f64(2.0));
        assert_eq!(tick_duration(0.0), TICK_DURATION);
    }

    #[test]
    fn test_snapshot_serialization_is_fast() {
        let mut engine = SimulationEngine::new(SimConfig::default());

        // Run enough ticks to populate entities
        for _ in 0..120 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(20),
            "Snapshot serialization took {:?}",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let mut engine = SimulationEngine::new(quiet_config());
        assert_eq!(
            handle_command(&mut engine, GameLoopCommand::PlayerCommand(PlayerCommand::Pause)),
            Flow::Continue
        );
        assert_eq!(handle_command(&mut engine, GameLoopCommand::Shutdown), Flow::Stop);
        assert_eq!(engine.tick().phase, SimPhase::Paused);
    }

    #[test]
    fn test_save_and_load_through_files() {
        let path = temp_path("roundtrip");
        let mut engine = SimulationEngine::new(quiet_config());
        for _ in 0..30 {
            engine.tick();
        }
        let saved_at = engine.time();
        handle_command(&mut engine, GameLoopCommand::Save(path.clone()));
        for _ in 0..30 {
            engine.tick();
        }
        assert_ne!(engine.time(), saved_at);

        handle_command(&mut engine, GameLoopCommand::Load(path.clone()));
        assert_eq!(engine.time(), saved_at);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bad_save_file_keeps_state() {
        let path = temp_path("garbage");
        fs::write(&path, b"definitely not a save").unwrap();
        let mut engine = SimulationEngine::new(quiet_config());
        for _ in 0..10 {
            engine.tick();
        }
        let before = engine.time();

        handle_command(&mut engine, GameLoopCommand::Load(path.clone()));
        handle_command(&mut engine, GameLoopCommand::Load(temp_path("missing")));
        assert_eq!(engine.time(), before);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_default_config_starts_targeting_worker() {
        let workers = Workers::spawn(&SimConfig::default()).unwrap();
        assert!(workers.targeting.is_some());

        let inline = SimConfig {
            inline_targeting: true,
            ..Default::default()
        };
        assert!(Workers::spawn(&inline).unwrap().targeting.is_none());
    }

    #[test]
    fn test_radar_contacts_arrive_from_worker() {
        let config = SimConfig {
            inline_targeting: false,
            ..Default::default()
        };
        let workers = Workers::spawn(&config).unwrap();
        assert!(workers.targeting.is_some());
        let mut engine = SimulationEngine::new(config);

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut frame = 0;
        let mut seen = false;
        while Instant::now() < deadline {
            let snapshot = step(&mut engine, &workers, frame);
            frame += 1;
            if !snapshot.radar_contacts.is_empty() {
                seen = true;
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        assert!(seen, "radar worker never reported contacts");
    }

    #[test]
    fn test_spawned_loop_publishes_snapshots() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(quiet_config(), latest.clone()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while latest.lock().unwrap().is_none() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(latest.lock().unwrap().is_some());

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
