//! Maze generation pipeline
//!
//! Rooms first, then the carver fills everything else, then the seams and
//! the perimeter are fixed up. Rocks and geysers go on top of the finished
//! walls, each pass with its own RNG stream.

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::carve::{carve_passages, CarveReport};
use crate::config::MazeConfig;
use crate::coords::CellMetrics;
use crate::echolocation::HintOracle;
use crate::error::MazeResult;
use crate::grid::{Cell, Direction, Grid, GridPos};
use crate::layout::MazeLayout;
use crate::pathfinding::{self, SolutionPath};
use crate::placement::{
    self, GeyserPlacement, GeyserSettings, Placements, PushOutcome, RockPlacement, RockSettings,
};
use crate::rooms::{self, RoomLayout};
use crate::seeds::MazeSeeds;

/// Build the bare maze: rooms, carved passages, seams and perimeter.
pub fn carve_maze(
    rows: usize,
    cols: usize,
    rng: &mut ChaCha8Rng,
) -> MazeResult<(Grid, RoomLayout, CarveReport)> {
    let layout = RoomLayout::for_extent(rows, cols)?;
    let mut grid = Grid::new(rows, cols);

    rooms::create_rooms(&mut grid, &layout)?;
    let report = carve_passages(&mut grid, layout.carve_seed, rng)?;
    rooms::connect_rooms_to_maze(&mut grid, &layout)?;
    rooms::create_perimeter_walls(&mut grid);

    Ok((grid, layout, report))
}

/// Generate a full maze level from a config.
pub fn generate_maze(config: &MazeConfig) -> MazeResult<GeneratedMaze> {
    generate_with_seeds(config, config.seeds())
}

/// Generate with explicit seeds, ignoring the config's seed fields.
pub fn generate_with_seeds(config: &MazeConfig, seeds: MazeSeeds) -> MazeResult<GeneratedMaze> {
    config.validate()?;

    let mut carve_rng = ChaCha8Rng::seed_from_u64(seeds.carve);
    let (grid, rooms, carve_report) = carve_maze(config.rows, config.columns, &mut carve_rng)?;

    let mut placements = Placements::default();
    if config.enable_rocks {
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.rocks);
        placements.rocks = placement::place_rocks(
            &grid,
            &rooms,
            &RockSettings::from(config),
            &mut placements.occupancy,
            &mut rng,
        );
    }
    if config.enable_geysers {
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.geysers);
        placements.geysers = placement::place_geysers(
            &grid,
            &rooms,
            &GeyserSettings::from(config),
            &mut placements.occupancy,
            &mut rng,
        );
    }

    info!(
        "Generated {}x{} maze (seed {}): {} rocks, {} geysers",
        config.rows,
        config.columns,
        seeds.master,
        placements.rocks.len(),
        placements.geysers.len()
    );

    Ok(GeneratedMaze {
        config: config.clone(),
        seeds,
        grid,
        rooms,
        carve_report,
        placements,
    })
}

/// A finished maze level. Replaced wholesale on regeneration.
#[derive(Clone, Debug)]
pub struct GeneratedMaze {
    config: MazeConfig,
    seeds: MazeSeeds,
    grid: Grid,
    rooms: RoomLayout,
    carve_report: CarveReport,
    placements: Placements,
}

impl GeneratedMaze {
    /// Cell state at (row, column). Read-only.
    pub fn get_cell(&self, row: usize, col: usize) -> MazeResult<&Cell> {
        self.grid.get(row, col)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn seeds(&self) -> MazeSeeds {
        self.seeds
    }

    pub fn rooms(&self) -> &RoomLayout {
        &self.rooms
    }

    pub fn goal(&self) -> GridPos {
        self.rooms.goal
    }

    /// Center of the start room.
    pub fn spawn(&self) -> GridPos {
        self.rooms.spawn()
    }

    pub fn carve_report(&self) -> &CarveReport {
        &self.carve_report
    }

    pub fn placements(&self) -> &Placements {
        &self.placements
    }

    pub fn rocks(&self) -> &[RockPlacement] {
        &self.placements.rocks
    }

    pub fn geysers(&self) -> &[GeyserPlacement] {
        &self.placements.geysers
    }

    pub fn metrics(&self) -> CellMetrics {
        self.config.metrics()
    }

    /// Solve from a world-space position to the goal.
    pub fn find_path(&self, position: [f32; 3]) -> MazeResult<SolutionPath> {
        pathfinding::solve_from_world(&self.grid, &self.metrics(), position, self.goal())
    }

    /// Solve from a grid cell to the goal.
    pub fn solve_from(&self, start: GridPos) -> MazeResult<SolutionPath> {
        pathfinding::solve(&self.grid, start, self.goal())
    }

    pub fn hint_oracle<'a>(&'a self, solution: &'a SolutionPath) -> HintOracle<'a> {
        HintOracle::new(
            &self.grid,
            solution,
            self.metrics(),
            self.config.hint_search_radius,
        )
    }

    pub fn layout(&self) -> MazeLayout {
        MazeLayout::build(self, &self.metrics())
    }

    /// Shove the rock at `rock` one cell toward `dir`.
    pub fn push_rock(&mut self, rock: GridPos, dir: Direction) -> PushOutcome {
        let outcome = placement::try_push(&self.grid, &mut self.placements.occupancy, rock, dir);
        if let PushOutcome::Moved(dest) = outcome {
            if let Some(placed) = self.placements.rocks.iter_mut().find(|r| r.cell == rock) {
                placed.cell = dest;
                placed.push_directions = placement::push_directions(&self.grid, dest);
            }
        }
        outcome
    }
}
