//! Fundamental geometric and simulation types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Generation-checked reference to a pool slot.
///
/// A handle stays valid only while the slot it names is active and has not
/// been freed since the handle was issued. Freeing a slot bumps its
/// generation, so stale handles are detected instead of silently aliasing
/// whatever reuses the slot.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Handle<T> {
    pub index: u32,
    pub generation: u32,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    pub fn slot(&self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}g{}", self.index, self.generation)
    }
}

/// RGBA color, 0-255 per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const FIRE: Color = Color::rgb(255, 150, 40);
    pub const SMOKE: Color = Color::rgb(120, 120, 130);
    pub const ROCK: Color = Color::rgb(140, 110, 90);
    pub const LASER: Color = Color::rgb(255, 60, 60);
    pub const MAIN_LASER: Color = Color::rgb(255, 220, 90);
    pub const MINING: Color = Color::rgb(80, 220, 255);
    pub const CRYSTAL_SHOCK: Color = Color::rgb(120, 255, 220);
    pub const REPAIR: Color = Color::rgb(90, 255, 120);
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Unit vector for an angle in radians (0 = +x, counter-clockwise).
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a vector in radians (0 = +x, counter-clockwise).
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Reflect `incoming` off a surface with unit normal `normal`.
pub fn reflect(incoming: Vec2, normal: Vec2) -> Vec2 {
    incoming - 2.0 * incoming.dot(normal) * normal
}
