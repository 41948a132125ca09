//! Geyser hazards in maze doorways.

use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{GeyserPlacement, Occupancy, Occupant};
use crate::config::MazeConfig;
use crate::grid::{Direction, Grid, GridPos};
use crate::rooms::RoomLayout;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeyserSettings {
    pub spawn_chance: f32,
    /// Cells this close (Manhattan) to a seam cell never scan for doorways.
    pub seam_exclusion_radius: usize,
}

impl Default for GeyserSettings {
    fn default() -> Self {
        Self {
            spawn_chance: 0.3,
            seam_exclusion_radius: 1,
        }
    }
}

impl From<&MazeConfig> for GeyserSettings {
    fn from(config: &MazeConfig) -> Self {
        Self {
            spawn_chance: config.geyser_spawn_chance,
            seam_exclusion_radius: config.seam_exclusion_radius,
        }
    }
}

fn near_seam(layout: &RoomLayout, pos: GridPos, radius: usize) -> bool {
    layout
        .seam_cells()
        .iter()
        .any(|seam| seam.manhattan(pos) <= radius)
}

/// The doorway leaving `pos` toward `dir`, as the other cell plus the
/// occupancy key, if the doorway is open from this side.
///
/// West and south doorways must also be open from the neighbor's side and are
/// keyed by the neighbor, so a doorway shares its key with the one found
/// scanning east or north from that neighbor.
fn doorway(grid: &Grid, pos: GridPos, dir: Direction) -> Option<(GridPos, GridPos)> {
    let cell = grid.cell(pos).ok()?;
    if cell.has_wall(dir) {
        return None;
    }
    let next = grid.neighbor(pos, dir)?;
    match dir {
        Direction::East | Direction::North => Some((next, pos)),
        Direction::West | Direction::South => {
            let other = grid.cell(next).ok()?;
            (!other.has_wall(dir.opposite())).then_some((next, next))
        }
    }
}

/// Scatter geysers over open doorways outside the rooms, skipping anything
/// already claimed by a rock or near a room seam.
pub fn place_geysers(
    grid: &Grid,
    layout: &RoomLayout,
    settings: &GeyserSettings,
    occupancy: &mut Occupancy,
    rng: &mut ChaCha8Rng,
) -> Vec<GeyserPlacement> {
    let mut placed = Vec::new();
    let mut doorways_seen = 0;

    for pos in grid.positions() {
        if layout.in_room(pos) {
            continue;
        }

        for dir in Direction::CARVE_ORDER {
            let Some((next, key)) = doorway(grid, pos, dir) else {
                continue;
            };
            if layout.in_room(next)
                || occupancy.is_occupied(key)
                || near_seam(layout, pos, settings.seam_exclusion_radius)
            {
                continue;
            }

            doorways_seen += 1;
            if rng.gen::<f32>() < settings.spawn_chance {
                occupancy.claim(key, Occupant::Geyser);
                placed.push(GeyserPlacement {
                    key,
                    cell: pos,
                    direction: dir,
                });
            }
        }
    }

    debug!(
        "Placed {} geysers over {} eligible doorways",
        placed.len(),
        doorways_seen
    );

    placed
}
