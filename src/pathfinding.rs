//! A* search over the maze grid.
//!
//! Movement follows [`Grid::can_move`], the same rule the carver's passages
//! satisfy, so any maze the generator builds is solvable here.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, warn};

use crate::coords::CellMetrics;
use crate::error::{MazeError, MazeResult};
use crate::grid::{Direction, Grid, GridPos};
use crate::tilemap::Tilemap;

/// Node for the A* priority queue
#[derive(Clone, Copy)]
struct PathNode {
    pos: GridPos,
    /// Cost so far plus heuristic.
    estimate: f64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.estimate == other.estimate
    }
}

impl Eq for PathNode {}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .estimate
            .partial_cmp(&self.estimate)
            .unwrap_or(Ordering::Equal)
    }
}

/// Shortest path from `start` to `goal`, both ends included.
pub fn find_path(grid: &Grid, start: GridPos, goal: GridPos) -> MazeResult<Vec<GridPos>> {
    grid.cell(start)?;
    grid.cell(goal)?;

    let (rows, cols) = (grid.rows(), grid.cols());
    let mut cost: Tilemap<f64> = Tilemap::new_with(rows, cols, f64::INFINITY);
    let mut came_from: Tilemap<Option<GridPos>> = Tilemap::new(rows, cols);
    let mut closed: Tilemap<bool> = Tilemap::new(rows, cols);

    let mut open = BinaryHeap::new();
    cost.set(start.row, start.col, 0.0);
    open.push(PathNode {
        pos: start,
        estimate: start.euclidean(goal),
    });

    while let Some(PathNode { pos, .. }) = open.pop() {
        if pos == goal {
            let mut path = vec![pos];
            let mut current = pos;
            while let Some(&Some(prev)) = came_from.get(current.row, current.col) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            return Ok(path);
        }

        if closed.get(pos.row, pos.col) == Some(&true) {
            continue;
        }
        closed.set(pos.row, pos.col, true);

        let here = cost.get(pos.row, pos.col).copied().unwrap_or(f64::INFINITY);

        for dir in Direction::ALL {
            if !grid.can_move(pos, dir) {
                continue;
            }
            let Some(next) = grid.neighbor(pos, dir) else {
                continue;
            };

            let tentative = here + 1.0;
            let known = cost.get(next.row, next.col).copied().unwrap_or(f64::INFINITY);
            if tentative < known {
                cost.set(next.row, next.col, tentative);
                came_from.set(next.row, next.col, Some(pos));
                open.push(PathNode {
                    pos: next,
                    estimate: tentative + next.euclidean(goal),
                });
            }
        }
    }

    Err(MazeError::PathNotFound { start, goal })
}

/// What a flood fill from the start could reach. Used to explain a failed search.
#[derive(Clone, Debug, PartialEq)]
pub struct ReachabilityReport {
    pub reachable_cells: usize,
    pub goal_reachable: bool,
    /// Reachable cell nearest the goal (Euclidean), if anything is reachable.
    pub closest_to_goal: Option<GridPos>,
}

pub fn diagnose_reachability(grid: &Grid, start: GridPos, goal: GridPos) -> ReachabilityReport {
    let reached = grid.reachable_from(start);

    let closest_to_goal = reached
        .iter()
        .filter(|(_, _, r)| **r)
        .map(|(row, col, _)| GridPos::new(row, col))
        .min_by(|a, b| {
            a.euclidean(goal)
                .partial_cmp(&b.euclidean(goal))
                .unwrap_or(Ordering::Equal)
        });

    ReachabilityReport {
        reachable_cells: reached.count_where(|r| *r),
        goal_reachable: reached.get(goal.row, goal.col) == Some(&true),
        closest_to_goal,
    }
}

/// Move a start that landed on a sealed cell to the first open neighbor,
/// scanning the surrounding 3x3 block row by row.
pub fn relocate_start(grid: &Grid, pos: GridPos) -> GridPos {
    if grid.open_sides(pos) > 0 {
        return pos;
    }
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (Some(row), Some(col)) = (
                pos.row.checked_add_signed(dr),
                pos.col.checked_add_signed(dc),
            ) else {
                continue;
            };
            let candidate = GridPos::new(row, col);
            if grid.open_sides(candidate) > 0 {
                debug!("Relocated sealed start {} to {}", pos, candidate);
                return candidate;
            }
        }
    }
    pos
}

/// A solved route with per-cell lookups for hinting.
#[derive(Clone, Debug)]
pub struct SolutionPath {
    cells: Vec<GridPos>,
    on_path: Tilemap<bool>,
    next_step: Tilemap<Option<Direction>>,
}

impl SolutionPath {
    fn from_cells(grid: &Grid, cells: Vec<GridPos>) -> Self {
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut on_path = Tilemap::new_with(rows, cols, false);
        let mut next_step = Tilemap::new_with(rows, cols, None);

        for (i, &pos) in cells.iter().enumerate() {
            on_path.set(pos.row, pos.col, true);
            if let Some(&next) = cells.get(i + 1) {
                next_step.set(pos.row, pos.col, pos.direction_to(next));
            }
        }

        Self {
            cells,
            on_path,
            next_step,
        }
    }

    pub fn cells(&self) -> &[GridPos] {
        &self.cells
    }

    /// Number of cells, including start and goal.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<GridPos> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<GridPos> {
        self.cells.last().copied()
    }

    pub fn is_on_path(&self, pos: GridPos) -> bool {
        self.on_path.get(pos.row, pos.col) == Some(&true)
    }

    /// Direction to the next path cell. `None` off the path and at the goal.
    pub fn suggested_direction(&self, pos: GridPos) -> Option<Direction> {
        self.next_step.get(pos.row, pos.col).copied().flatten()
    }
}

/// Solve from `start` to `goal`, logging why when there is no route.
pub fn solve(grid: &Grid, start: GridPos, goal: GridPos) -> MazeResult<SolutionPath> {
    match find_path(grid, start, goal) {
        Ok(cells) => {
            debug!("Solved {} -> {} in {} cells", start, goal, cells.len());
            Ok(SolutionPath::from_cells(grid, cells))
        }
        Err(err @ MazeError::PathNotFound { .. }) => {
            let report = diagnose_reachability(grid, start, goal);
            warn!(
                "No path from {} to {}: {} cells reachable, goal reachable: {}, closest reachable: {}",
                start,
                goal,
                report.reachable_cells,
                report.goal_reachable,
                report
                    .closest_to_goal
                    .map_or_else(|| "none".to_string(), |pos| pos.to_string()),
            );
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Solve from a world-space position: round to the nearest cell, clamp into
/// the grid, then step off a sealed cell if needed.
pub fn solve_from_world(
    grid: &Grid,
    metrics: &CellMetrics,
    position: [f32; 3],
    goal: GridPos,
) -> MazeResult<SolutionPath> {
    let start = metrics.world_to_grid(position, grid.rows(), grid.cols());
    let start = relocate_start(grid, start);
    solve(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 grid with a short route along row 0 / column 2 and a longer detour
    /// through the middle joining at (1, 2).
    fn two_route_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        let open = [
            (0, 0, Direction::East),
            (0, 1, Direction::East),
            (0, 2, Direction::North),
            (1, 2, Direction::North),
            (0, 0, Direction::North),
            (1, 0, Direction::North),
            (2, 0, Direction::East),
            (2, 1, Direction::South),
            (1, 1, Direction::East),
        ];
        for (row, col, dir) in open {
            grid.open_passage(GridPos::new(row, col), dir).unwrap();
        }
        grid
    }

    #[test]
    fn test_finds_unique_shortest_path() {
        let grid = two_route_grid();
        let path = find_path(&grid, GridPos::new(0, 0), GridPos::new(2, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                GridPos::new(0, 0),
                GridPos::new(0, 1),
                GridPos::new(0, 2),
                GridPos::new(1, 2),
                GridPos::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_walled_off_goal() {
        let mut grid = two_route_grid();
        grid.close_passage(GridPos::new(1, 2), Direction::North).unwrap();

        let result = solve(&grid, GridPos::new(0, 0), GridPos::new(2, 2));
        assert!(matches!(result, Err(MazeError::PathNotFound { .. })));

        let report = diagnose_reachability(&grid, GridPos::new(0, 0), GridPos::new(2, 2));
        assert_eq!(report.reachable_cells, 8);
        assert!(!report.goal_reachable);
        assert_eq!(report.closest_to_goal.map(|p| p.euclidean(GridPos::new(2, 2))), Some(1.0));
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = two_route_grid();
        let path = find_path(&grid, GridPos::new(1, 1), GridPos::new(1, 1)).unwrap();
        assert_eq!(path, vec![GridPos::new(1, 1)]);
    }

    #[test]
    fn test_solution_lookups() {
        let grid = two_route_grid();
        let solution = solve(&grid, GridPos::new(0, 0), GridPos::new(2, 2)).unwrap();

        assert_eq!(solution.len(), 5);
        assert!(solution.is_on_path(GridPos::new(1, 2)));
        assert!(!solution.is_on_path(GridPos::new(1, 1)));
        assert!(!solution.is_on_path(GridPos::new(9, 9)));
        assert_eq!(solution.suggested_direction(GridPos::new(0, 0)), Some(Direction::East));
        assert_eq!(solution.suggested_direction(GridPos::new(0, 2)), Some(Direction::North));
        assert_eq!(solution.suggested_direction(GridPos::new(2, 2)), None);
        assert_eq!(solution.suggested_direction(GridPos::new(1, 1)), None);
    }

    #[test]
    fn test_resolving_is_idempotent() {
        let grid = two_route_grid();
        let first = solve(&grid, GridPos::new(2, 0), GridPos::new(2, 2)).unwrap();
        let second = solve(&grid, GridPos::new(2, 0), GridPos::new(2, 2)).unwrap();
        assert_eq!(first.cells(), second.cells());
    }

    #[test]
    fn test_sealed_start_is_relocated() {
        let mut grid = Grid::new(3, 3);
        grid.open_passage(GridPos::new(0, 1), Direction::North).unwrap();
        // (0, 0) is sealed; the row-major scan reaches (0, 1) before (1, 1).
        assert_eq!(relocate_start(&grid, GridPos::new(0, 0)), GridPos::new(0, 1));
        // An open cell stays put.
        assert_eq!(relocate_start(&grid, GridPos::new(1, 1)), GridPos::new(1, 1));
        assert_eq!(relocate_start(&grid, GridPos::new(2, 2)), GridPos::new(1, 1));
        assert_eq!(relocate_start(&grid, GridPos::new(2, 0)), GridPos::new(1, 1));

        // A sealed cell with no open neighbor is returned unchanged.
        let sealed = Grid::new(3, 3);
        assert_eq!(relocate_start(&sealed, GridPos::new(2, 2)), GridPos::new(2, 2));
    }

    #[test]
    fn test_solve_from_world_clamps() {
        let grid = two_route_grid();
        let metrics = CellMetrics::new(5.0, 5.0, false);
        let solution =
            solve_from_world(&grid, &metrics, [-40.0, 0.0, -3.0], GridPos::new(2, 2)).unwrap();
        assert_eq!(solution.start(), Some(GridPos::new(0, 0)));
        assert_eq!(solution.goal(), Some(GridPos::new(2, 2)));
    }

    #[test]
    fn test_out_of_range_endpoints() {
        let grid = two_route_grid();
        assert!(matches!(
            find_path(&grid, GridPos::new(0, 0), GridPos::new(3, 3)),
            Err(MazeError::OutOfRange { .. })
        ));
    }
}
