//! World-space spawn list for an engine host.
//!
//! Everything here is derived from a [`GeneratedMaze`]; the host instantiates
//! one prefab per entry and never has to look at wall flags itself.

use serde::Serialize;

use crate::coords::{half_cell_offset, CellMetrics};
use crate::generator::GeneratedMaze;
use crate::grid::{Direction, GridPos};

/// Height of the goal marker above the floor.
pub const GOAL_MARKER_HEIGHT: f32 = 1.0;

/// Yaw in degrees for a wall on the given side of its cell.
pub fn wall_yaw(dir: Direction) -> f32 {
    match dir {
        Direction::North => 0.0,
        Direction::East => 90.0,
        Direction::South => 180.0,
        Direction::West => 270.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FloorTile {
    pub row: usize,
    pub col: usize,
    pub position: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WallSegment {
    pub row: usize,
    pub col: usize,
    /// Side of the owning cell, as a name ("North", "East", ...).
    pub side: &'static str,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MazeLayout {
    pub floors: Vec<FloorTile>,
    pub walls: Vec<WallSegment>,
    pub spawn: [f32; 3],
    pub goal: [f32; 3],
    pub rocks: Vec<[f32; 3]>,
    pub geysers: Vec<[f32; 3]>,
}

/// Sides whose walls this cell owns. Each physical wall has exactly one owner:
/// east and north always, south only on the first row, west only on the first column.
fn owned_sides(pos: GridPos) -> impl Iterator<Item = Direction> {
    [
        Some(Direction::East),
        Some(Direction::North),
        (pos.row == 0).then_some(Direction::South),
        (pos.col == 0).then_some(Direction::West),
    ]
    .into_iter()
    .flatten()
}

impl MazeLayout {
    pub fn build(maze: &GeneratedMaze, metrics: &CellMetrics) -> Self {
        let grid = maze.grid();
        let config = maze.config();

        let mut floors = Vec::with_capacity(grid.rows() * grid.cols());
        let mut walls = Vec::new();

        for (pos, cell) in grid.iter() {
            let center = metrics.grid_to_world(pos, 0.0);
            floors.push(FloorTile {
                row: pos.row,
                col: pos.col,
                position: center,
            });

            for dir in owned_sides(pos) {
                if !cell.has_wall(dir) {
                    continue;
                }
                let (dx, dz) = half_cell_offset(metrics, dir);
                walls.push(WallSegment {
                    row: pos.row,
                    col: pos.col,
                    side: dir.name(),
                    position: [center[0] + dx, 0.0, center[2] + dz],
                    yaw_degrees: wall_yaw(dir),
                });
            }
        }

        let rocks = maze
            .rocks()
            .iter()
            .map(|rock| metrics.grid_to_world(rock.cell, config.rock_height))
            .collect();
        let geysers = maze
            .geysers()
            .iter()
            .map(|geyser| metrics.doorway_midpoint(geyser.cell, geyser.direction, config.geyser_height))
            .collect();

        Self {
            floors,
            walls,
            spawn: metrics.grid_to_world(maze.spawn(), 0.0),
            goal: metrics.grid_to_world(maze.goal(), GOAL_MARKER_HEIGHT),
            rocks,
            geysers,
        }
    }
}
