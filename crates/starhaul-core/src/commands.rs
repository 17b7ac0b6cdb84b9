//! Player commands and the per-unit bounded command queue.
//!
//! Player commands are queued on the engine and processed at the next tick
//! boundary. Unit commands live in each unit's `CommandQueue` and are
//! reinterpreted every tick by the behavior system.

use serde::{Deserialize, Serialize};

use crate::components::{Asteroid, Resource, Unit};
use crate::constants::MAX_COMMANDS;
use crate::enums::*;
use crate::types::{Handle, Vec2};

/// An order for a single unit.
///
/// Externally tagged: saves go through `bincode`, which cannot decode
/// internally tagged enums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum UnitCommand {
    #[default]
    Idle,
    Move {
        destination: Vec2,
    },
    /// Cyclic waypoint; consecutive Patrol entries form a loop.
    Patrol {
        destination: Vec2,
    },
    /// Travel while engaging; `target` is a priority target for the cannons.
    AttackMove {
        destination: Vec2,
        target: Option<Handle<Asteroid>>,
    },
    Gather {
        resource: Handle<Resource>,
    },
    /// Haul cargo home, then resume gathering `resource` if it still exists.
    ReturnCargo {
        resource: Handle<Resource>,
    },
    /// Direct main-cannon order. Never stored in the queue.
    MainCannon {
        target: Handle<Asteroid>,
    },
}

impl UnitCommand {
    /// Waypoint for travel-type commands.
    pub fn destination(&self) -> Option<Vec2> {
        match *self {
            UnitCommand::Move { destination }
            | UnitCommand::Patrol { destination }
            | UnitCommand::AttackMove { destination, .. } => Some(destination),
            _ => None,
        }
    }

    pub fn is_patrol(&self) -> bool {
        matches!(self, UnitCommand::Patrol { .. })
    }
}

/// Bounded FIFO of unit commands with a cursor on the current entry.
///
/// Not a ring: replacing resets it, appending fails once `MAX_COMMANDS`
/// entries are stored, and running off the end empties it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandQueue {
    entries: [UnitCommand; MAX_COMMANDS],
    len: usize,
    cursor: usize,
}

impl CommandQueue {
    /// The command being executed, or `None` when idle.
    pub fn current(&self) -> Option<&UnitCommand> {
        (self.cursor < self.len).then(|| &self.entries[self.cursor])
    }

    pub fn current_mut(&mut self) -> Option<&mut UnitCommand> {
        if self.cursor < self.len {
            Some(&mut self.entries[self.cursor])
        } else {
            None
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == MAX_COMMANDS
    }

    /// Length and cursor fit the fixed storage. Only a decoded queue can
    /// break this.
    pub fn is_well_formed(&self) -> bool {
        self.len <= MAX_COMMANDS && self.cursor <= self.len
    }

    /// Stored commands in order, including ones already executed.
    pub fn entries(&self) -> &[UnitCommand] {
        &self.entries[..self.len]
    }

    /// Drop everything and make `command` the only entry.
    pub fn replace(&mut self, command: UnitCommand) {
        self.clear();
        self.entries[0] = command;
        self.len = 1;
    }

    /// Replace the queue with several entries and point the cursor at `cursor`.
    pub fn replace_many(&mut self, commands: &[UnitCommand], cursor: usize) {
        self.clear();
        for command in commands.iter().take(MAX_COMMANDS) {
            self.entries[self.len] = *command;
            self.len += 1;
        }
        self.cursor = cursor.min(self.len);
    }

    /// Append a command. Returns false when the queue is full.
    pub fn push(&mut self, command: UnitCommand) -> bool {
        if self.is_full() {
            return false;
        }
        if self.cursor >= self.len {
            self.clear();
        }
        self.entries[self.len] = command;
        self.len += 1;
        true
    }

    /// Move to the next entry; empties the queue after the last one.
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.len {
            self.clear();
        }
    }

    /// Remove the current entry, keeping the ones after it.
    pub fn remove_current(&mut self) {
        if self.cursor >= self.len {
            return;
        }
        self.entries.copy_within(self.cursor + 1..self.len, self.cursor);
        self.len -= 1;
        self.entries[self.len] = UnitCommand::Idle;
        if self.cursor >= self.len {
            self.clear();
        }
    }

    /// Called when the current Patrol waypoint is reached: step to the next
    /// waypoint of the run, or wrap to the first Patrol entry of the run.
    ///
    /// A run of one waypoint loops with the travel entry before it, which is
    /// turned into a Patrol. With nothing to loop with, the queue moves on.
    pub fn advance_patrol(&mut self) {
        if self.cursor >= self.len {
            return;
        }
        let next = self.cursor + 1;
        if next < self.len && self.entries[next].is_patrol() {
            self.cursor = next;
            return;
        }
        let mut start = self.cursor;
        while start > 0 && self.entries[start - 1].is_patrol() {
            start -= 1;
        }
        if start < self.cursor {
            self.cursor = start;
            return;
        }
        let previous = start.checked_sub(1).and_then(|i| self.entries[i].destination());
        match previous {
            Some(destination) => {
                self.entries[start - 1] = UnitCommand::Patrol { destination };
                self.cursor = start - 1;
            }
            None => self.advance(),
        }
    }

    pub fn clear(&mut self) {
        self.entries = [UnitCommand::Idle; MAX_COMMANDS];
        self.len = 0;
        self.cursor = 0;
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Selection ---
    /// Replace the selection with these units.
    SelectUnits { units: Vec<Handle<Unit>> },
    ClearSelection,

    // --- Orders (applied to every selected unit) ---
    /// Issue a unit command. `queued` appends instead of replacing.
    Schedule { command: UnitCommand, queued: bool },
    SetBehavior { mode: BehaviorMode },
    /// Only valid when the Mothership is selected.
    SetProduction { mode: ProductionMode },

    // --- View ---
    SetCamera { center: Vec2 },

    // --- Simulation control ---
    Pause,
    Resume,
    /// 1.0 = normal, clamped to [0, 4].
    SetTimeScale { scale: f32 },
}
