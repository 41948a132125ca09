//! Configuration for maze generation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coords::CellMetrics;
use crate::error::{MazeError, MazeResult};
use crate::rooms;
use crate::seeds::MazeSeeds;

/// Tuning parameters for one maze level.
///
/// Missing fields in a JSON file fall back to [`MazeConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Grid rows (world z extent).
    pub rows: usize,

    /// Grid columns (world x extent).
    pub columns: usize,

    /// Master seed. Ignored when `full_random` is set.
    pub seed: u64,

    /// Draw the master seed from the OS instead of `seed`.
    pub full_random: bool,

    pub enable_rocks: bool,

    /// Probability that a surviving rock candidate gets a rock.
    pub rock_spawn_chance: f32,

    /// Minimum Manhattan distance between any two rocks.
    pub rock_min_spacing: usize,

    pub enable_geysers: bool,

    /// Probability that an eligible doorway gets a geyser.
    pub geyser_spawn_chance: f32,

    /// Cells within this Manhattan distance of a room seam never host a geyser.
    pub seam_exclusion_radius: usize,

    /// BFS depth used when classifying a hint direction as reaching the solution.
    pub hint_search_radius: usize,

    /// World size of one cell along x.
    pub cell_width: f32,

    /// World size of one cell along z.
    pub cell_height: f32,

    /// Leave a small gap between cells in world space.
    pub add_gaps: bool,

    /// World y of spawned rocks.
    pub rock_height: f32,

    /// World y of spawned geysers.
    pub geyser_height: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            seed: 12345,
            full_random: false,
            enable_rocks: true,
            rock_spawn_chance: 0.4,
            rock_min_spacing: 2,
            enable_geysers: true,
            geyser_spawn_chance: 0.3,
            seam_exclusion_radius: 1,
            hint_search_radius: 5,
            cell_width: 5.0,
            cell_height: 5.0,
            add_gaps: true,
            rock_height: 0.0,
            geyser_height: 0.5,
        }
    }
}

impl MazeConfig {
    /// Load a config from a JSON file. Fields not present keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> MazeResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: MazeConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn to_json(&self) -> MazeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field. Generation refuses to start on an invalid config.
    pub fn validate(&self) -> MazeResult<()> {
        rooms::validate_extent(self.rows, self.columns)?;

        check_probability("rock_spawn_chance", self.rock_spawn_chance)?;
        check_probability("geyser_spawn_chance", self.geyser_spawn_chance)?;

        check_positive("cell_width", self.cell_width)?;
        check_positive("cell_height", self.cell_height)?;

        if !self.rock_height.is_finite() || !self.geyser_height.is_finite() {
            return Err(MazeError::invalid("spawn heights must be finite"));
        }

        Ok(())
    }

    /// Seeds for this run. `full_random` draws a fresh master each call.
    pub fn seeds(&self) -> MazeSeeds {
        if self.full_random {
            MazeSeeds::random()
        } else {
            MazeSeeds::from_master(self.seed)
        }
    }

    pub fn metrics(&self) -> CellMetrics {
        CellMetrics::new(self.cell_width, self.cell_height, self.add_gaps)
    }
}

fn check_probability(name: &str, value: f32) -> MazeResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MazeError::invalid(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

fn check_positive(name: &str, value: f32) -> MazeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MazeError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}
