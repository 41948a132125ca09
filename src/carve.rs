//! Depth-first backtracking carver.
//!
//! Walks from a seed cell into unvisited neighbors, opening a passage for
//! every step, and backs up when a cell has nothing left to visit. The walk
//! uses an explicit stack; draws from the RNG happen in the same order as the
//! classic recursive formulation, so a seed reproduces the same maze.

use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::MazeResult;
use crate::grid::{Direction, Grid, GridPos};

/// What the carver did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarveReport {
    /// Cells visited for the first time by the carver (rooms excluded).
    pub visited: usize,
    /// Cells that had no unvisited neighbor on their first visit.
    ///
    /// Recorded only. These never become goals.
    pub dead_ends: Vec<GridPos>,
}

/// Unvisited in-grid neighbors, in carve order.
fn available_moves(grid: &Grid, pos: GridPos) -> Vec<Direction> {
    Direction::CARVE_ORDER
        .into_iter()
        .filter(|&dir| {
            grid.neighbor(pos, dir)
                .and_then(|next| grid.cell(next).ok())
                .is_some_and(|cell| !cell.visited)
        })
        .collect()
}

/// Carve passages from `seed` through every unvisited cell reachable by
/// stepping between unvisited cells.
///
/// Already-visited cells (the rooms) are treated as solid and never entered.
pub fn carve_passages(grid: &mut Grid, seed: GridPos, rng: &mut ChaCha8Rng) -> MazeResult<CarveReport> {
    let mut report = CarveReport::default();
    // Fail up front on a bad seed rather than partway through.
    grid.cell(seed)?;

    let mut stack = vec![seed];

    while let Some(&current) = stack.last() {
        let moves = available_moves(grid, current);
        let cell = grid.cell_mut(current)?;
        let first_visit = !cell.visited;

        if first_visit {
            report.visited += 1;
            if moves.is_empty() {
                report.dead_ends.push(current);
            }
        }
        cell.visited = true;

        if moves.is_empty() {
            stack.pop();
            continue;
        }

        let dir = moves[rng.gen_range(0..moves.len())];
        let next = grid.open_passage(current, dir)?;
        stack.push(next);
    }

    debug!(
        "Carved {} cells from {} ({} dead ends)",
        report.visited,
        seed,
        report.dead_ends.len()
    );

    Ok(report)
}
