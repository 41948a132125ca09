//! Start and end rooms, their seams into the maze, and the outer perimeter.
//!
//! Both rooms are fixed 3x3 blocks: the start room in the (0, 0) corner and
//! the end room in the opposite corner. Each room connects to the carved maze
//! through exactly one seam on its middle row.

use crate::error::{MazeError, MazeResult};
use crate::grid::{Direction, Grid, GridPos};

/// Rooms are always square with this side length.
pub const ROOM_SIZE: usize = 3;

/// Reject extents where the rooms overlap, a seam falls inside a room, or the
/// cells outside the rooms split into disconnected parts.
pub fn validate_extent(rows: usize, cols: usize) -> MazeResult<()> {
    if rows < ROOM_SIZE || cols < ROOM_SIZE + 1 {
        return Err(MazeError::invalid(format!(
            "a {}x{} grid cannot hold the start room and its seam (need at least {}x{})",
            rows,
            cols,
            ROOM_SIZE,
            ROOM_SIZE + 1
        )));
    }
    if rows < 2 * ROOM_SIZE + 1 && cols < 2 * ROOM_SIZE + 1 {
        return Err(MazeError::invalid(format!(
            "a {}x{} grid leaves no connected corridor between the rooms \
             (one side must be at least {})",
            rows,
            cols,
            2 * ROOM_SIZE + 1
        )));
    }
    Ok(())
}

/// A square block of cells with all internal walls open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    /// Lowest row/column corner.
    pub origin: GridPos,
    pub size: usize,
}

impl Room {
    pub fn new(origin: GridPos, size: usize) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row >= self.origin.row
            && pos.row < self.origin.row + self.size
            && pos.col >= self.origin.col
            && pos.col < self.origin.col + self.size
    }

    pub fn center(&self) -> GridPos {
        GridPos::new(
            self.origin.row + self.size / 2,
            self.origin.col + self.size / 2,
        )
    }

    pub fn cells(&self) -> impl Iterator<Item = GridPos> {
        let Room { origin, size } = *self;
        (0..size * size).map(move |idx| GridPos::new(origin.row + idx / size, origin.col + idx % size))
    }
}

/// The single opening between a room and the carved maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seam {
    pub room_cell: GridPos,
    pub maze_cell: GridPos,
    /// Direction from `room_cell` to `maze_cell`.
    pub direction: Direction,
}

/// Where the rooms, seams, goal and carve seed sit for a given extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomLayout {
    pub start: Room,
    pub end: Room,
    pub start_seam: Seam,
    pub end_seam: Seam,
    pub goal: GridPos,
    pub carve_seed: GridPos,
}

impl RoomLayout {
    /// Layout for a validated extent.
    pub fn for_extent(rows: usize, cols: usize) -> MazeResult<Self> {
        validate_extent(rows, cols)?;

        let start = Room::new(GridPos::new(0, 0), ROOM_SIZE);
        let end = Room::new(GridPos::new(rows - ROOM_SIZE, cols - ROOM_SIZE), ROOM_SIZE);

        let start_seam = Seam {
            room_cell: GridPos::new(1, 2),
            maze_cell: GridPos::new(1, 3),
            direction: Direction::East,
        };
        let end_seam = Seam {
            room_cell: GridPos::new(rows - 2, cols - 3),
            maze_cell: GridPos::new(rows - 2, cols - 4),
            direction: Direction::West,
        };

        Ok(Self {
            start,
            end,
            start_seam,
            end_seam,
            goal: end.center(),
            carve_seed: start_seam.maze_cell,
        })
    }

    pub fn in_room(&self, pos: GridPos) -> bool {
        self.start.contains(pos) || self.end.contains(pos)
    }

    pub fn seams(&self) -> [Seam; 2] {
        [self.start_seam, self.end_seam]
    }

    /// Both cells of both seams.
    pub fn seam_cells(&self) -> [GridPos; 4] {
        [
            self.start_seam.room_cell,
            self.start_seam.maze_cell,
            self.end_seam.room_cell,
            self.end_seam.maze_cell,
        ]
    }

    /// Center of the start room, where the player spawns.
    pub fn spawn(&self) -> GridPos {
        self.start.center()
    }
}

/// Mark every room cell visited and open the walls between room cells.
/// Walls facing out of the room are left alone.
pub fn create_room(grid: &mut Grid, room: &Room) -> MazeResult<()> {
    for pos in room.cells() {
        grid.cell_mut(pos)?.visited = true;
        for dir in [Direction::East, Direction::North] {
            if let Some(next) = grid.neighbor(pos, dir) {
                if room.contains(next) {
                    grid.open_passage(pos, dir)?;
                }
            }
        }
    }
    Ok(())
}

/// Stamp both rooms and flag the goal cell.
pub fn create_rooms(grid: &mut Grid, layout: &RoomLayout) -> MazeResult<()> {
    create_room(grid, &layout.start)?;
    create_room(grid, &layout.end)?;
    grid.cell_mut(layout.goal)?.goal = true;
    Ok(())
}

/// Open exactly the two seam passages.
pub fn connect_rooms_to_maze(grid: &mut Grid, layout: &RoomLayout) -> MazeResult<()> {
    for seam in layout.seams() {
        grid.open_passage(seam.room_cell, seam.direction)?;
    }
    Ok(())
}

/// Force every boundary-facing wall flag closed.
pub fn create_perimeter_walls(grid: &mut Grid) {
    let (rows, cols) = (grid.rows(), grid.cols());
    for (pos, cell) in grid.iter_mut() {
        if pos.row == 0 {
            cell.wall_south = true;
        }
        if pos.row + 1 == rows {
            cell.wall_north = true;
        }
        if pos.col == 0 {
            cell.wall_west = true;
        }
        if pos.col + 1 == cols {
            cell.wall_east = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_validation() {
        assert!(validate_extent(10, 10).is_ok());
        assert!(validate_extent(3, 7).is_ok());
        assert!(validate_extent(7, 4).is_ok());
        assert!(validate_extent(5, 5).is_err());
        assert!(validate_extent(6, 6).is_err());
        assert!(validate_extent(2, 20).is_err());
        assert!(validate_extent(20, 3).is_err());
    }

    #[test]
    fn test_layout_positions() {
        let layout = RoomLayout::for_extent(10, 12).unwrap();
        assert_eq!(layout.end.origin, GridPos::new(7, 9));
        assert_eq!(layout.goal, GridPos::new(8, 10));
        assert_eq!(layout.carve_seed, GridPos::new(1, 3));
        assert_eq!(layout.end_seam.maze_cell, GridPos::new(8, 8));
        assert_eq!(layout.end_seam.room_cell, GridPos::new(8, 9));
        assert!(!layout.in_room(layout.start_seam.maze_cell));
        assert!(!layout.in_room(layout.end_seam.maze_cell));
        assert!(layout.in_room(layout.end_seam.room_cell));
    }

    #[test]
    fn test_create_room_opens_only_interior() {
        let mut grid = Grid::new(10, 10);
        let room = Room::new(GridPos::new(0, 0), ROOM_SIZE);
        create_room(&mut grid, &room).unwrap();

        let center = grid.cell(GridPos::new(1, 1)).unwrap();
        assert_eq!(center.open_sides(), 4);
        assert!(center.visited);

        // Edge cells keep their outward walls.
        let east_edge = grid.cell(GridPos::new(1, 2)).unwrap();
        assert!(east_edge.wall_east);
        assert!(!grid.cell(GridPos::new(1, 3)).unwrap().visited);
        assert!(grid.passage_consistency_violations().is_empty());
    }

    #[test]
    fn test_seams_and_perimeter() {
        let mut grid = Grid::new(8, 8);
        let layout = RoomLayout::for_extent(8, 8).unwrap();
        create_rooms(&mut grid, &layout).unwrap();
        connect_rooms_to_maze(&mut grid, &layout).unwrap();
        create_perimeter_walls(&mut grid);

        assert!(grid.can_move(GridPos::new(1, 2), Direction::East));
        assert!(grid.can_move(GridPos::new(6, 4), Direction::East));
        assert!(!grid.can_move(GridPos::new(5, 4), Direction::East));
        assert_eq!(grid.goal(), Some(GridPos::new(6, 6)));
        assert_eq!(grid.goal_count(), 1);
    }
}
