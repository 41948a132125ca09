//! Obstacle placement over a carved maze
//!
//! Rocks go first and take priority; geysers fill doorways afterwards and
//! avoid any cell a rock already claimed. Neither pass touches wall flags,
//! so the maze's connectivity is exactly what the carver produced.

pub mod geysers;
pub mod rocks;

use std::collections::HashMap;

use crate::grid::{Direction, GridPos};

pub use geysers::{place_geysers, GeyserSettings};
pub use rocks::{place_rocks, push_directions, try_push, PushOutcome, RockSettings};

/// What claimed a grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Rock,
    Geyser,
}

/// Grid positions claimed by placed obstacles for one generation.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    claimed: HashMap<GridPos, Occupant>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.claimed.contains_key(&pos)
    }

    pub fn occupant(&self, pos: GridPos) -> Option<Occupant> {
        self.claimed.get(&pos).copied()
    }

    /// Claim a position. Returns false if it was already taken.
    pub fn claim(&mut self, pos: GridPos, occupant: Occupant) -> bool {
        if self.claimed.contains_key(&pos) {
            return false;
        }
        self.claimed.insert(pos, occupant);
        true
    }

    pub fn release(&mut self, pos: GridPos) -> Option<Occupant> {
        self.claimed.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    pub fn rocks(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.claimed
            .iter()
            .filter(|(_, occupant)| **occupant == Occupant::Rock)
            .map(|(pos, _)| *pos)
    }
}

/// A placed rock and the directions it can be pushed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RockPlacement {
    pub cell: GridPos,
    pub push_directions: Vec<Direction>,
}

/// A geyser sitting in the doorway between `cell` and its neighbor in `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeyserPlacement {
    /// Position recorded in the occupancy set.
    pub key: GridPos,
    /// Cell the doorway was found from.
    pub cell: GridPos,
    pub direction: Direction,
}

/// Everything the placement passes produced.
#[derive(Clone, Debug, Default)]
pub struct Placements {
    pub rocks: Vec<RockPlacement>,
    pub geysers: Vec<GeyserPlacement>,
    pub occupancy: Occupancy,
}
