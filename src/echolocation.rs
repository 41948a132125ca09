//! Echolocation hints
//!
//! When the player pings, the game colours the echo wave green or red. Green
//! means "you are on the solution or facing a way that gets you back to it".
//! [`HintOracle`] answers that question from the grid and a solved path; the
//! engine only supplies the player's world position and camera facing.

use std::collections::VecDeque;

use crate::coords::{world_direction_to_grid, CellMetrics};
use crate::grid::{Direction, Grid, GridPos};
use crate::pathfinding::SolutionPath;
use crate::tilemap::Tilemap;

/// How a single step from a cell relates to the solution path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionHint {
    /// Off the grid or walled.
    Blocked,
    /// The neighbor is on the solution path.
    TowardSolution,
    /// The neighbor has at most one open side.
    DeadEnd,
    /// The solution path is a short walk beyond the neighbor.
    ReachesSolution,
    /// Open, but the solution is not within the search radius.
    AwayFromSolution,
}

impl DirectionHint {
    pub fn is_positive(self) -> bool {
        matches!(self, DirectionHint::TowardSolution | DirectionHint::ReachesSolution)
    }
}

/// Why a hint came out the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintReason {
    OutsideMaze,
    OnSolutionPath,
    /// The facing vector has no horizontal component.
    NoFacing,
    Facing(Direction, DirectionHint),
    /// Facing away from the solution, but the corridor leaves no other choice.
    ForcedCorridor(Direction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hint {
    pub positive: bool,
    /// Cell the player stands in, if inside the maze.
    pub cell: Option<GridPos>,
    pub reason: HintReason,
}

/// Answers hint queries against one solved maze.
pub struct HintOracle<'a> {
    grid: &'a Grid,
    solution: &'a SolutionPath,
    metrics: CellMetrics,
    search_radius: usize,
}

impl<'a> HintOracle<'a> {
    pub fn new(
        grid: &'a Grid,
        solution: &'a SolutionPath,
        metrics: CellMetrics,
        search_radius: usize,
    ) -> Self {
        Self {
            grid,
            solution,
            metrics,
            search_radius,
        }
    }

    pub fn classify_direction(&self, pos: GridPos, dir: Direction) -> DirectionHint {
        if !self.grid.can_move(pos, dir) {
            return DirectionHint::Blocked;
        }
        let Some(target) = self.grid.neighbor(pos, dir) else {
            return DirectionHint::Blocked;
        };

        if self.solution.is_on_path(target) {
            DirectionHint::TowardSolution
        } else if self.grid.open_sides(target) <= 1 {
            DirectionHint::DeadEnd
        } else if self.reaches_solution(target, pos) {
            DirectionHint::ReachesSolution
        } else {
            DirectionHint::AwayFromSolution
        }
    }

    /// Bounded BFS from `start` looking for a path cell. The first step may
    /// not go straight back to `from`.
    fn reaches_solution(&self, start: GridPos, from: GridPos) -> bool {
        let mut seen = Tilemap::new_with(self.grid.rows(), self.grid.cols(), false);
        let mut queue = VecDeque::new();
        seen.set(start.row, start.col, true);
        queue.push_back((start, 0usize));

        while let Some((current, distance)) = queue.pop_front() {
            if self.solution.is_on_path(current) {
                return true;
            }
            if distance >= self.search_radius {
                continue;
            }
            for dir in Direction::ALL {
                let Some(next) = self.grid.neighbor(current, dir) else {
                    continue;
                };
                if distance == 0 && next == from {
                    continue;
                }
                if seen.get(next.row, next.col) == Some(&true) || !self.grid.can_move(current, dir) {
                    continue;
                }
                seen.set(next.row, next.col, true);
                queue.push_back((next, distance + 1));
            }
        }

        false
    }

    /// Hint for a player at a world position looking along `facing`.
    pub fn evaluate(&self, position: [f32; 3], facing: [f32; 3]) -> Hint {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        if !self.metrics.world_in_grid(position, rows, cols) {
            return Hint {
                positive: false,
                cell: None,
                reason: HintReason::OutsideMaze,
            };
        }
        let cell = self.metrics.world_to_grid(position, rows, cols);

        if self.solution.is_on_path(cell) {
            return Hint {
                positive: true,
                cell: Some(cell),
                reason: HintReason::OnSolutionPath,
            };
        }

        let Some(dir) = world_direction_to_grid(facing) else {
            return Hint {
                positive: false,
                cell: Some(cell),
                reason: HintReason::NoFacing,
            };
        };

        let class = self.classify_direction(cell, dir);
        let hint = |positive, reason| Hint {
            positive,
            cell: Some(cell),
            reason,
        };
        match class {
            DirectionHint::TowardSolution | DirectionHint::ReachesSolution => {
                hint(true, HintReason::Facing(dir, class))
            }
            DirectionHint::Blocked | DirectionHint::DeadEnd => {
                hint(false, HintReason::Facing(dir, class))
            }
            DirectionHint::AwayFromSolution if self.grid.open_sides(cell) == 2 => {
                hint(true, HintReason::ForcedCorridor(dir))
            }
            DirectionHint::AwayFromSolution => hint(false, HintReason::Facing(dir, class)),
        }
    }
}
