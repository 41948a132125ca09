//! Seed management for maze generation
//!
//! Each generation pass draws from its own RNG stream so that, for example,
//! toggling geysers off does not change where rocks land.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeds for every randomized pass of a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Backtracking carver (neighbor choice at every step)
    pub carve: u64,
    /// Rock candidate shuffle and spawn rolls
    pub rocks: u64,
    /// Geyser spawn rolls
    pub geysers: u64,
}

impl MazeSeeds {
    /// Derive all sub-seeds deterministically from a master seed.
    ///
    /// Sub-seeds are the first words of a ChaCha8 stream keyed by the master.
    /// New passes must draw after the existing ones.
    pub fn from_master(master: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(master);
        let carve = rng.next_u64();
        let rocks = rng.next_u64();
        let geysers = rng.next_u64();
        Self {
            master,
            carve,
            rocks,
            geysers,
        }
    }

    /// Draw a master seed from the OS entropy source.
    pub fn random() -> Self {
        Self::from_master(rand::random())
    }

    pub fn builder(master: u64) -> MazeSeedsBuilder {
        MazeSeedsBuilder::new(master)
    }
}

/// Override single pass seeds while deriving the rest from the master.
pub struct MazeSeedsBuilder {
    seeds: MazeSeeds,
}

impl MazeSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: MazeSeeds::from_master(master),
        }
    }

    pub fn carve(mut self, seed: u64) -> Self {
        self.seeds.carve = seed;
        self
    }

    pub fn rocks(mut self, seed: u64) -> Self {
        self.seeds.rocks = seed;
        self
    }

    pub fn geysers(mut self, seed: u64) -> Self {
        self.seeds.geysers = seed;
        self
    }

    pub fn build(self) -> MazeSeeds {
        self.seeds
    }
}

impl std::fmt::Display for MazeSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MazeSeeds {{ master: {}, carve: {}, rocks: {}, geysers: {} }}",
            self.master, self.carve, self.rocks, self.geysers,
        )
    }
}
