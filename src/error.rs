//! Error type shared by generation, grid queries and the solver.

use thiserror::Error;

use crate::grid::{Direction, GridPos};

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid maze configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A passage was opened or closed toward the outside of the grid.
    #[error("cannot open or close the {dir} wall of {pos}: it faces the grid edge")]
    EdgeOfGrid { pos: GridPos, dir: Direction },

    #[error("no path from {start} to {goal}")]
    PathNotFound { start: GridPos, goal: GridPos },

    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl MazeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MazeError::InvalidConfiguration { reason: reason.into() }
    }
}

pub type MazeResult<T> = std::result::Result<T, MazeError>;
