//! Cell grid with per-cell wall flags.
//!
//! Every cell stores its own four walls. A passage between two neighbors is
//! open only when both cells agree, so every mutation that opens or closes a
//! shared wall goes through [`Grid::open_passage`] / [`Grid::close_passage`],
//! which update the pair together.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{MazeError, MazeResult};
use crate::tilemap::Tilemap;

/// Cardinal direction on the grid.
///
/// North is toward `row + 1` (the "front" wall), east toward `col + 1`
/// ("right"), south toward `row - 1` ("back"), west toward `col - 1` ("left").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in the order moves are enumerated by the carver.
    pub const CARVE_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// All four directions, clockwise from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// (row delta, column delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (1, 0),
            Direction::East => (0, 1),
            Direction::South => (-1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step one cell in a direction. `None` when the step would go below zero;
    /// the upper bound is the grid's business.
    pub fn step(self, dir: Direction) -> Option<GridPos> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(GridPos::new(row, col))
    }

    pub fn manhattan(self, other: GridPos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn euclidean(self, other: GridPos) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Direction of a one-step move from `self` to `other`, if they are adjacent.
    pub fn direction_to(self, other: GridPos) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.step(dir) == Some(other))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One maze cell: four wall flags plus generation markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub wall_north: bool,
    pub wall_east: bool,
    pub wall_south: bool,
    pub wall_west: bool,
    /// Carving bookkeeping; meaningless once generation is done.
    pub visited: bool,
    pub goal: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            wall_north: true,
            wall_east: true,
            wall_south: true,
            wall_west: true,
            visited: false,
            goal: false,
        }
    }
}

impl Cell {
    pub fn has_wall(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.wall_north,
            Direction::East => self.wall_east,
            Direction::South => self.wall_south,
            Direction::West => self.wall_west,
        }
    }

    pub fn set_wall(&mut self, dir: Direction, present: bool) {
        match dir {
            Direction::North => self.wall_north = present,
            Direction::East => self.wall_east = present,
            Direction::South => self.wall_south = present,
            Direction::West => self.wall_west = present,
        }
    }

    pub fn open_sides(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| !self.has_wall(d)).count()
    }
}

/// The maze grid. Size is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Tilemap<Cell>,
}

impl Grid {
    /// All walls closed, nothing visited, no goal.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Tilemap::new(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.rows
    }

    pub fn cols(&self) -> usize {
        self.cells.cols
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains(pos.row, pos.col)
    }

    fn out_of_range(&self, pos: GridPos) -> MazeError {
        MazeError::OutOfRange {
            row: pos.row,
            col: pos.col,
            rows: self.rows(),
            cols: self.cols(),
        }
    }

    pub fn cell(&self, pos: GridPos) -> MazeResult<&Cell> {
        self.cells
            .get(pos.row, pos.col)
            .ok_or_else(|| self.out_of_range(pos))
    }

    pub fn cell_mut(&mut self, pos: GridPos) -> MazeResult<&mut Cell> {
        let err = self.out_of_range(pos);
        self.cells.get_mut(pos.row, pos.col).ok_or(err)
    }

    /// Read accessor by row and column.
    pub fn get(&self, row: usize, col: usize) -> MazeResult<&Cell> {
        self.cell(GridPos::new(row, col))
    }

    /// The in-grid neighbor in a direction.
    pub fn neighbor(&self, pos: GridPos, dir: Direction) -> Option<GridPos> {
        pos.step(dir).filter(|&next| self.contains(next))
    }

    /// Open the wall between `pos` and its neighbor in `dir`, on both cells.
    pub fn open_passage(&mut self, pos: GridPos, dir: Direction) -> MazeResult<GridPos> {
        self.set_passage(pos, dir, false)
    }

    /// Close the wall between `pos` and its neighbor in `dir`, on both cells.
    pub fn close_passage(&mut self, pos: GridPos, dir: Direction) -> MazeResult<GridPos> {
        self.set_passage(pos, dir, true)
    }

    fn set_passage(&mut self, pos: GridPos, dir: Direction, wall: bool) -> MazeResult<GridPos> {
        if !self.contains(pos) {
            return Err(self.out_of_range(pos));
        }
        let Some(next) = self.neighbor(pos, dir) else {
            return Err(MazeError::EdgeOfGrid { pos, dir });
        };
        self.cell_mut(pos)?.set_wall(dir, wall);
        self.cell_mut(next)?.set_wall(dir.opposite(), wall);
        Ok(next)
    }

    /// True when both cells agree the passage is open.
    pub fn can_move(&self, pos: GridPos, dir: Direction) -> bool {
        let Some(next) = self.neighbor(pos, dir) else {
            return false;
        };
        match (self.cells.get(pos.row, pos.col), self.cells.get(next.row, next.col)) {
            (Some(from), Some(to)) => !from.has_wall(dir) && !to.has_wall(dir.opposite()),
            _ => false,
        }
    }

    /// Number of open walls on a cell; zero outside the grid.
    pub fn open_sides(&self, pos: GridPos) -> usize {
        self.cells
            .get(pos.row, pos.col)
            .map_or(0, Cell::open_sides)
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let cols = self.cols();
        (0..self.rows() * cols).map(move |idx| GridPos::new(idx / cols, idx % cols))
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        self.cells
            .iter()
            .map(|(row, col, cell)| (GridPos::new(row, col), cell))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (GridPos, &mut Cell)> {
        self.cells
            .iter_mut()
            .map(|(row, col, cell)| (GridPos::new(row, col), cell))
    }

    /// First cell carrying the goal flag.
    pub fn goal(&self) -> Option<GridPos> {
        self.iter().find(|(_, cell)| cell.goal).map(|(pos, _)| pos)
    }

    pub fn goal_count(&self) -> usize {
        self.cells.count_where(|cell| cell.goal)
    }

    /// Flood fill over open passages. Read-only.
    pub fn reachable_from(&self, start: GridPos) -> Tilemap<bool> {
        let mut reached = Tilemap::new_with(self.rows(), self.cols(), false);
        if !self.contains(start) {
            return reached;
        }

        let mut queue = VecDeque::new();
        reached.set(start.row, start.col, true);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for dir in Direction::ALL {
                if !self.can_move(current, dir) {
                    continue;
                }
                if let Some(next) = self.neighbor(current, dir) {
                    if reached.get(next.row, next.col) == Some(&false) {
                        reached.set(next.row, next.col, true);
                        queue.push_back(next);
                    }
                }
            }
        }

        reached
    }

    /// Adjacent pairs whose shared wall flags disagree. Each pair is reported
    /// once, from the lower cell (east/north side checks only).
    pub fn passage_consistency_violations(&self) -> Vec<(GridPos, Direction)> {
        let mut violations = Vec::new();
        for (pos, cell) in self.iter() {
            for dir in [Direction::East, Direction::North] {
                let Some(next) = self.neighbor(pos, dir) else {
                    continue;
                };
                if let Some(other) = self.cells.get(next.row, next.col) {
                    if cell.has_wall(dir) != other.has_wall(dir.opposite()) {
                        violations.push((pos, dir));
                    }
                }
            }
        }
        violations
    }
}
