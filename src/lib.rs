//! Maze level generation library
//!
//! Procedural maze carving with fixed start and end rooms, pushable rock and
//! geyser placement, an A* solver and the echolocation hint oracle built on
//! it. Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod carve;
pub mod config;
pub mod coords;
pub mod echolocation;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod pathfinding;
pub mod placement;
pub mod rooms;
pub mod seeds;
pub mod tilemap;

pub use config::MazeConfig;
pub use error::{MazeError, MazeResult};
pub use generator::{carve_maze, generate_maze, generate_with_seeds, GeneratedMaze};
pub use grid::{Cell, Direction, Grid, GridPos};
pub use pathfinding::SolutionPath;
pub use seeds::MazeSeeds;
