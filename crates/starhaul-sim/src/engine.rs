//! Simulation engine: the deterministic core of the game.
//!
//! `SimulationEngine` owns the world, processes player commands at tick
//! boundaries, runs every system in a fixed order and produces
//! `WorldSnapshot`s. Headless, so it can be driven directly by tests.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starhaul_core::commands::PlayerCommand;
use starhaul_core::config::SimConfig;
use starhaul_core::enums::SimPhase;
use starhaul_core::state::WorldSnapshot;
use starhaul_core::types::{SimTime, Vec2};
use starhaul_targeting::snapshot::{RadarInput, TargetSuggestions, TargetingSnapshot};

use crate::persistence::{self, PersistenceError};
use crate::systems;
use crate::world::World;
use crate::world_setup;

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: SimPhase,
    time_scale: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create an engine with a fresh world. Same config, same simulation.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let time_scale = config.time_scale;
        tracing::info!(seed = config.seed, world_seed = config.world_seed, "simulation created");
        Self {
            world: world_setup::create_world(config),
            time: SimTime::default(),
            phase: SimPhase::default(),
            time_scale,
            rng,
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            let dt = self.world.config.dt;
            self.run_systems(dt);
            self.time.advance(dt);
            self.world.tick = self.time.tick;
        }

        systems::snapshot::build_snapshot(&mut self.world, self.time, self.phase)
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Wall-clock pacing factor for the driver loop. Does not change `dt`.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn config(&self) -> &SimConfig {
        &self.world.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that stage scenarios directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // --- Background scan plumbing ---

    /// Copy of what the target scan needs.
    pub fn targeting_snapshot(&self) -> TargetingSnapshot {
        systems::targeting::build_snapshot(&self.world)
    }

    /// Apply a finished scan. Suggestions for units that no longer exist are
    /// ignored.
    pub fn apply_target_suggestions(&mut self, suggestions: &TargetSuggestions) {
        systems::targeting::apply(&mut self.world, suggestions);
    }

    /// Radar scan input, or `None` while the Mothership is down.
    pub fn radar_input(&self) -> Option<RadarInput> {
        systems::targeting::radar_input(&self.world)
    }

    pub fn set_radar_contacts(&mut self, contacts: Vec<Vec2>) {
        self.world.radar_contacts = contacts;
    }

    // --- Persistence ---

    pub fn save_state(&self) -> Result<Vec<u8>, PersistenceError> {
        let bytes = persistence::encode(&self.world, self.time)?;
        tracing::info!(bytes = bytes.len(), tick = self.time.tick, "state saved");
        Ok(bytes)
    }

    /// Replace the world with a saved one. On error the current state is kept.
    pub fn load_state(&mut self, bytes: &[u8]) -> Result<(), PersistenceError> {
        match persistence::decode(bytes, self.world.config.clone()) {
            Ok((world, time)) => {
                self.world = world;
                self.time = time;
                self.command_queue.clear();
                tracing::info!(tick = time.tick, "state loaded");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "state load rejected");
                Err(err)
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SelectUnits { units } => {
                systems::orders::select(&mut self.world, units);
            }
            PlayerCommand::ClearSelection => {
                self.world.selection.clear();
            }
            PlayerCommand::Schedule { command, queued } => {
                systems::orders::schedule(&mut self.world, command, queued);
            }
            PlayerCommand::SetBehavior { mode } => {
                systems::orders::set_behavior(&mut self.world, mode);
            }
            PlayerCommand::SetProduction { mode } => {
                systems::orders::set_production(&mut self.world, mode);
            }
            PlayerCommand::SetCamera { center } => {
                self.world.camera = center;
            }
            PlayerCommand::Pause => {
                self.phase = SimPhase::Paused;
            }
            PlayerCommand::Resume => {
                self.phase = SimPhase::Running;
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        let world = &mut self.world;
        let rng = &mut self.rng;
        // 1. Spawning and despawning around the anchors
        systems::spawning::run(world, rng);
        // 2. Gravity and integration
        systems::physics::run(world, dt);
        // 3. Collisions (rock-rock, then unit-rock)
        systems::collision::run(world, rng);
        // 4. Mothership respawn timer
        systems::respawn::run(world, rng, dt);
        // 5. Target scan, when not handled by a background worker
        if world.config.inline_targeting {
            systems::targeting::run_inline(world);
        }
        // 6. Per-unit commands, steering and weapons
        systems::behavior::run(world, rng, dt);
        // 7. Energy, unloading and production
        systems::economy::run(world, dt);
        // 8. Particle aging
        systems::particles::run(world, dt);
    }
}
