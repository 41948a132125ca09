//! Conversions between maze grid coordinates and world coordinates.
//!
//! Grid cell (0, 0) sits at the world origin. World x grows with the column,
//! world z with the row, y is up. Positions are `[x, y, z]`.

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, GridPos};

/// Gap inserted between neighboring cells when gaps are enabled.
pub const CELL_GAP: f32 = 0.2;

/// World size of one cell and the spacing between cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
    pub gap: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(5.0, 5.0, true)
    }
}

impl CellMetrics {
    pub fn new(cell_width: f32, cell_height: f32, add_gaps: bool) -> Self {
        Self {
            cell_width,
            cell_height,
            gap: if add_gaps { CELL_GAP } else { 0.0 },
        }
    }

    /// Distance between neighboring cell centers along x.
    pub fn pitch_x(&self) -> f32 {
        self.cell_width + self.gap
    }

    /// Distance between neighboring cell centers along z.
    pub fn pitch_z(&self) -> f32 {
        self.cell_height + self.gap
    }

    /// Center of a cell at height `y`.
    pub fn grid_to_world(&self, pos: GridPos, y: f32) -> [f32; 3] {
        [
            pos.col as f32 * self.pitch_x(),
            y,
            pos.row as f32 * self.pitch_z(),
        ]
    }

    /// Nearest cell to a world position, clamped into a `rows` x `cols` grid.
    ///
    /// The y component is ignored.
    pub fn world_to_grid(&self, position: [f32; 3], rows: usize, cols: usize) -> GridPos {
        let row = round_clamped(position[2] / self.pitch_z(), rows);
        let col = round_clamped(position[0] / self.pitch_x(), cols);
        GridPos::new(row, col)
    }

    /// True when the world position rounds to a cell inside the grid without clamping.
    pub fn world_in_grid(&self, position: [f32; 3], rows: usize, cols: usize) -> bool {
        let row = (position[2] / self.pitch_z()).round();
        let col = (position[0] / self.pitch_x()).round();
        row >= 0.0 && col >= 0.0 && (row as usize) < rows && (col as usize) < cols
    }

    /// World-space midpoint of the doorway between `pos` and its neighbor in `dir`.
    pub fn doorway_midpoint(&self, pos: GridPos, dir: Direction, y: f32) -> [f32; 3] {
        let [x, _, z] = self.grid_to_world(pos, y);
        let (dx, dz) = half_cell_offset(self, dir);
        [x + dx, y, z + dz]
    }
}

/// Offset from a cell center to the middle of its wall in `dir`.
pub(crate) fn half_cell_offset(metrics: &CellMetrics, dir: Direction) -> (f32, f32) {
    match dir {
        Direction::East => (metrics.cell_width / 2.0, 0.0),
        Direction::North => (0.0, metrics.cell_height / 2.0),
        Direction::West => (-metrics.cell_width / 2.0, 0.0),
        Direction::South => (0.0, -metrics.cell_height / 2.0),
    }
}

fn round_clamped(value: f32, len: usize) -> usize {
    let rounded = value.round();
    // Negative and NaN both land on the first cell.
    if rounded.is_nan() || rounded <= 0.0 {
        return 0;
    }
    (rounded as usize).min(len.saturating_sub(1))
}

/// Grid direction closest to a world-space facing vector.
///
/// The dominant horizontal axis wins; ties go to the x axis. Returns `None`
/// for a vector with no horizontal component.
pub fn world_direction_to_grid(facing: [f32; 3]) -> Option<Direction> {
    let (x, z) = (facing[0], facing[2]);
    if x == 0.0 && z == 0.0 {
        return None;
    }
    if z.abs() > x.abs() {
        Some(if z > 0.0 { Direction::North } else { Direction::South })
    } else {
        Some(if x > 0.0 { Direction::East } else { Direction::West })
    }
}
