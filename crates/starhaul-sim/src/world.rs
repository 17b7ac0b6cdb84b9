//! Simulation context: every pool plus the global economy and bookkeeping.
//!
//! A single `World` is passed by `&mut` to each system. There is no hidden
//! global state, so several independent worlds can coexist (tests do this).

use serde::{Deserialize, Serialize};

use starhaul_core::components::{Asteroid, Resource, Unit};
use starhaul_core::config::SimConfig;
use starhaul_core::constants::*;
use starhaul_core::enums::MessageLevel;
use starhaul_core::events::{SimEvent, UiMessage};
use starhaul_core::types::{Handle, Vec2};

use crate::pool::{ParticleRing, Pool};

/// Pending Mothership respawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MothershipDown {
    /// Seconds until the respawn attempt.
    pub remaining: f32,
    /// Where it was destroyed; the respawn search starts here.
    pub position: Vec2,
}

pub struct World {
    pub config: SimConfig,
    pub units: Pool<Unit>,
    pub asteroids: Pool<Asteroid>,
    pub resources: Pool<Resource>,
    pub particles: ParticleRing,

    // --- Economy ---
    /// Global energy pool shared by the Mothership's weapons.
    pub energy: f32,
    pub max_energy: f32,
    pub resources_stored: f32,

    // --- Spawning ---
    pub camera: Vec2,
    /// Points around which the world is kept populated.
    pub anchors: Vec<Vec2>,

    // --- Mothership ---
    /// Reserved slot of the Mothership in `units`.
    pub mothership_slot: usize,
    pub mothership_down: Option<MothershipDown>,

    // --- Interface ---
    pub selection: Vec<Handle<Unit>>,
    pub radar_contacts: Vec<Vec2>,
    pub messages: Vec<UiMessage>,
    pub events: Vec<SimEvent>,
    /// Tick stamped onto new messages.
    pub tick: u64,
}

impl World {
    /// Empty pools sized to the fixed capacities, economy from `config`.
    pub fn new(config: SimConfig) -> Self {
        Self {
            units: Pool::with_capacity(MAX_UNITS),
            asteroids: Pool::with_capacity(MAX_ASTEROIDS),
            resources: Pool::with_capacity(MAX_RESOURCES),
            particles: ParticleRing::with_capacity(MAX_PARTICLES),
            energy: config.starting_energy.min(config.max_energy),
            max_energy: config.max_energy,
            resources_stored: config.starting_resources,
            camera: Vec2::ZERO,
            anchors: Vec::new(),
            mothership_slot: 0,
            mothership_down: None,
            selection: Vec::new(),
            radar_contacts: Vec::new(),
            messages: Vec::new(),
            events: Vec::new(),
            tick: 0,
            config,
        }
    }

    /// Slot of the Mothership if it is currently alive.
    pub fn mothership_index(&self) -> Option<usize> {
        let slot = self.mothership_slot;
        (self.units.is_active(slot) && self.units.slot(slot).is_mothership()).then_some(slot)
    }

    pub fn mothership(&self) -> Option<&Unit> {
        self.mothership_index().map(|i| self.units.slot(i))
    }

    pub fn message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(UiMessage {
            level,
            text: text.into(),
            tick: self.tick,
        });
    }

    /// Selected handles that still resolve, in selection order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection
            .iter()
            .filter_map(|&h| self.units.resolve(h))
            .collect()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.units
            .handle(index)
            .is_some_and(|h| self.selection.contains(&h))
    }

    /// Remove a non-Mothership unit.
    pub fn free_unit(&mut self, index: usize) {
        if let Some(handle) = self.units.handle(index) {
            self.selection.retain(|&h| h != handle);
        }
        self.units.free(index);
    }

    /// Remove an asteroid and report it.
    pub fn free_asteroid(&mut self, index: usize) {
        if !self.asteroids.is_active(index) {
            return;
        }
        let asteroid = self.asteroids.slot(index);
        let event = SimEvent::AsteroidDestroyed {
            position: asteroid.position,
            radius: asteroid.radius,
        };
        self.asteroids.free(index);
        self.events.push(event);
    }

    /// Remove a depleted crystal and report it.
    pub fn free_resource(&mut self, index: usize) {
        if !self.resources.is_active(index) {
            return;
        }
        let position = self.resources.slot(index).position;
        self.resources.free(index);
        self.events.push(SimEvent::CrystalDepleted { position });
    }
}
