//! Pushable rock placement
//!
//! A rock is only useful where the player can stand behind it and shove it
//! into an open cell, so candidates are cells that sit in the middle of a
//! straight run with a reachable cell on the far side.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{Occupancy, Occupant, RockPlacement};
use crate::config::MazeConfig;
use crate::grid::{Direction, Grid, GridPos};
use crate::rooms::RoomLayout;

/// Push directions in the order they are tested.
const PUSH_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RockSettings {
    pub spawn_chance: f32,
    pub min_spacing: usize,
}

impl Default for RockSettings {
    fn default() -> Self {
        Self {
            spawn_chance: 0.4,
            min_spacing: 2,
        }
    }
}

impl From<&MazeConfig> for RockSettings {
    fn from(config: &MazeConfig) -> Self {
        Self {
            spawn_chance: config.rock_spawn_chance,
            min_spacing: config.rock_min_spacing,
        }
    }
}

/// Most rocks a grid of this size gets.
pub fn rock_cap(rows: usize, cols: usize) -> usize {
    (rows * cols / 50).max(1)
}

/// Can a rock at `rock` be pushed one cell toward `dir`?
///
/// The player stands on the cell behind the rock (opposite `dir`) and the rock
/// lands on the cell ahead, which must not be a dead end.
pub fn can_push(grid: &Grid, rock: GridPos, dir: Direction) -> bool {
    let Ok(cell) = grid.cell(rock) else {
        return false;
    };
    if cell.has_wall(dir) || cell.has_wall(dir.opposite()) {
        return false;
    }

    let behind = grid
        .neighbor(rock, dir.opposite())
        .and_then(|pos| grid.cell(pos).ok());
    let ahead = grid.neighbor(rock, dir);

    match (behind, ahead) {
        (Some(origin), Some(dest_pos)) => {
            let Ok(dest) = grid.cell(dest_pos) else {
                return false;
            };
            !origin.has_wall(dir) && !dest.has_wall(dir.opposite()) && dest.open_sides() >= 2
        }
        _ => false,
    }
}

/// All directions a rock at `pos` could be pushed.
pub fn push_directions(grid: &Grid, pos: GridPos) -> Vec<Direction> {
    PUSH_ORDER
        .into_iter()
        .filter(|&dir| can_push(grid, pos, dir))
        .collect()
}

fn too_close(occupancy: &Occupancy, pos: GridPos, min_spacing: usize) -> bool {
    occupancy.is_occupied(pos) || occupancy.rocks().any(|rock| rock.manhattan(pos) < min_spacing)
}

/// Place rocks on pushable cells outside the rooms.
///
/// Candidates are shuffled, then walked in order: each one far enough from
/// every placed rock gets a rock with probability `spawn_chance`, until the
/// size cap is reached.
pub fn place_rocks(
    grid: &Grid,
    layout: &RoomLayout,
    settings: &RockSettings,
    occupancy: &mut Occupancy,
    rng: &mut ChaCha8Rng,
) -> Vec<RockPlacement> {
    let mut candidates: Vec<RockPlacement> = grid
        .positions()
        .filter(|&pos| !layout.in_room(pos))
        .filter_map(|pos| {
            let push_directions = push_directions(grid, pos);
            (!push_directions.is_empty()).then_some(RockPlacement {
                cell: pos,
                push_directions,
            })
        })
        .collect();

    let candidate_count = candidates.len();
    candidates.shuffle(rng);

    let cap = rock_cap(grid.rows(), grid.cols());
    let mut placed = Vec::new();

    for candidate in candidates {
        if placed.len() >= cap {
            break;
        }
        if too_close(occupancy, candidate.cell, settings.min_spacing) {
            continue;
        }
        if rng.gen::<f32>() < settings.spawn_chance {
            occupancy.claim(candidate.cell, Occupant::Rock);
            placed.push(candidate);
        }
    }

    debug!(
        "Placed {} rocks from {} candidates (cap {})",
        placed.len(),
        candidate_count,
        cap
    );

    placed
}

/// Result of shoving a rock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// The rock now sits on this cell.
    Moved(GridPos),
    /// A wall is in the way.
    Blocked,
    /// Another obstacle holds the destination.
    Obstructed(Occupant),
    /// There is no rock at the given position.
    NoRock,
}

/// Slide a rock one cell toward `dir` if the passage is open and the
/// destination is free. Only the occupancy set changes.
pub fn try_push(grid: &Grid, occupancy: &mut Occupancy, rock: GridPos, dir: Direction) -> PushOutcome {
    if occupancy.occupant(rock) != Some(Occupant::Rock) {
        return PushOutcome::NoRock;
    }
    if !grid.can_move(rock, dir) {
        return PushOutcome::Blocked;
    }
    let Some(dest) = grid.neighbor(rock, dir) else {
        return PushOutcome::Blocked;
    };
    if let Some(occupant) = occupancy.occupant(dest) {
        return PushOutcome::Obstructed(occupant);
    }

    occupancy.release(rock);
    occupancy.claim(dest, Occupant::Rock);
    PushOutcome::Moved(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve::carve_passages;
    use crate::rooms;
    use rand::SeedableRng;

    /// Row 1 is one straight corridor, every other cell is sealed.
    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 5);
        for col in 0..4 {
            grid.open_passage(GridPos::new(1, col), Direction::East).unwrap();
        }
        grid
    }

    fn carved_maze(rows: usize, cols: usize, seed: u64) -> (Grid, RoomLayout) {
        let mut grid = Grid::new(rows, cols);
        let layout = RoomLayout::for_extent(rows, cols).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rooms::create_rooms(&mut grid, &layout).unwrap();
        carve_passages(&mut grid, layout.carve_seed, &mut rng).unwrap();
        rooms::connect_rooms_to_maze(&mut grid, &layout).unwrap();
        rooms::create_perimeter_walls(&mut grid);
        (grid, layout)
    }

    #[test]
    fn test_push_needs_open_cell_ahead() {
        let grid = corridor();
        assert_eq!(
            push_directions(&grid, GridPos::new(1, 2)),
            vec![Direction::East, Direction::West]
        );
        // West of (1, 1) is the dead-end cell (1, 0).
        assert_eq!(push_directions(&grid, GridPos::new(1, 1)), vec![Direction::East]);
        assert!(push_directions(&grid, GridPos::new(1, 0)).is_empty());
        assert!(push_directions(&grid, GridPos::new(0, 2)).is_empty());
    }

    #[test]
    fn test_try_push() {
        let grid = corridor();
        let mut occupancy = Occupancy::new();
        occupancy.claim(GridPos::new(1, 2), Occupant::Rock);
        occupancy.claim(GridPos::new(1, 4), Occupant::Geyser);

        assert_eq!(
            try_push(&grid, &mut occupancy, GridPos::new(1, 2), Direction::North),
            PushOutcome::Blocked
        );
        assert_eq!(
            try_push(&grid, &mut occupancy, GridPos::new(1, 2), Direction::East),
            PushOutcome::Moved(GridPos::new(1, 3))
        );
        assert_eq!(
            try_push(&grid, &mut occupancy, GridPos::new(1, 3), Direction::East),
            PushOutcome::Obstructed(Occupant::Geyser)
        );
        assert_eq!(
            try_push(&grid, &mut occupancy, GridPos::new(1, 2), Direction::East),
            PushOutcome::NoRock
        );
        assert!(occupancy.is_occupied(GridPos::new(1, 3)));
        assert!(!occupancy.is_occupied(GridPos::new(1, 2)));
    }

    #[test]
    fn test_rocks_respect_cap_spacing_and_rooms() {
        for seed in 0..20 {
            let (grid, layout) = carved_maze(15, 15, seed);
            let before = grid.clone();
            let mut occupancy = Occupancy::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed + 100);
            let settings = RockSettings {
                spawn_chance: 1.0,
                min_spacing: 3,
            };

            let rocks = place_rocks(&grid, &layout, &settings, &mut occupancy, &mut rng);

            assert!(rocks.len() <= rock_cap(15, 15));
            assert_eq!(grid, before);
            for (i, a) in rocks.iter().enumerate() {
                assert!(!layout.in_room(a.cell));
                assert_eq!(push_directions(&grid, a.cell), a.push_directions);
                for b in &rocks[i + 1..] {
                    assert!(a.cell.manhattan(b.cell) >= 3);
                }
            }
        }
    }

    #[test]
    fn test_zero_chance_places_nothing() {
        let (grid, layout) = carved_maze(10, 10, 5);
        let mut occupancy = Occupancy::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let settings = RockSettings {
            spawn_chance: 0.0,
            ..Default::default()
        };
        assert!(place_rocks(&grid, &layout, &settings, &mut occupancy, &mut rng).is_empty());
        assert!(occupancy.is_empty());
    }
}
