//! ASCII rendering and export for generated mazes
//!
//! North (higher rows) is drawn at the top. Every cell takes one character
//! with a wall character on each side, so a R x C maze renders as
//! (2R + 1) lines of (2C + 1) characters.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::generator::GeneratedMaze;
use crate::grid::{Direction, GridPos};
use crate::pathfinding::SolutionPath;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Walls plus spawn and goal
    Walls,
    /// Rooms, rocks and geysers on top of the walls
    Obstacles,
    /// Obstacles plus the solution path
    Solution,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Walls => "Walls",
            AsciiMode::Obstacles => "Obstacles",
            AsciiMode::Solution => "Solution",
        }
    }
}

pub const SPAWN_CHAR: char = 'S';
pub const GOAL_CHAR: char = 'G';
pub const ROCK_CHAR: char = 'R';
pub const GEYSER_CHAR: char = 'g';
pub const PATH_CHAR: char = '*';
pub const ROOM_CHAR: char = '.';

struct Canvas {
    rows: usize,
    lines: Vec<Vec<char>>,
}

impl Canvas {
    fn new(rows: usize, cols: usize) -> Self {
        let mut lines = vec![vec![' '; 2 * cols + 1]; 2 * rows + 1];
        for (y, line) in lines.iter_mut().enumerate() {
            for (x, ch) in line.iter_mut().enumerate() {
                if y % 2 == 0 && x % 2 == 0 {
                    *ch = '+';
                }
            }
        }
        Self { rows, lines }
    }

    /// Text coordinates (line, column) of a cell's center.
    fn center(&self, pos: GridPos) -> (usize, usize) {
        (2 * (self.rows - 1 - pos.row) + 1, 2 * pos.col + 1)
    }

    /// Text coordinates of the wall slot on one side of a cell.
    fn side(&self, pos: GridPos, dir: Direction) -> (usize, usize) {
        let (y, x) = self.center(pos);
        match dir {
            Direction::North => (y - 1, x),
            Direction::South => (y + 1, x),
            Direction::East => (y, x + 1),
            Direction::West => (y, x - 1),
        }
    }

    fn put(&mut self, (y, x): (usize, usize), ch: char) {
        if let Some(slot) = self.lines.get_mut(y).and_then(|line| line.get_mut(x)) {
            *slot = ch;
        }
    }

    fn finish(self) -> String {
        let mut out = String::new();
        for line in self.lines {
            out.extend(line);
            out.push('\n');
        }
        out
    }
}

/// Render a maze as ASCII. `solution` is only drawn in [`AsciiMode::Solution`].
pub fn render_maze_ascii(
    maze: &GeneratedMaze,
    mode: AsciiMode,
    solution: Option<&SolutionPath>,
) -> String {
    let grid = maze.grid();
    let mut canvas = Canvas::new(grid.rows(), grid.cols());

    for (pos, cell) in grid.iter() {
        for dir in Direction::ALL {
            if cell.has_wall(dir) {
                let ch = match dir {
                    Direction::North | Direction::South => '-',
                    Direction::East | Direction::West => '|',
                };
                canvas.put(canvas.side(pos, dir), ch);
            }
        }
    }

    if mode != AsciiMode::Walls {
        for room in [maze.rooms().start, maze.rooms().end] {
            for pos in room.cells() {
                canvas.put(canvas.center(pos), ROOM_CHAR);
            }
        }
    }

    if mode == AsciiMode::Solution {
        if let Some(solution) = solution {
            for &pos in solution.cells() {
                canvas.put(canvas.center(pos), PATH_CHAR);
            }
        }
    }

    if mode != AsciiMode::Walls {
        for rock in maze.rocks() {
            canvas.put(canvas.center(rock.cell), ROCK_CHAR);
        }
        for geyser in maze.geysers() {
            canvas.put(canvas.side(geyser.cell, geyser.direction), GEYSER_CHAR);
        }
    }

    canvas.put(canvas.center(maze.spawn()), SPAWN_CHAR);
    canvas.put(canvas.center(maze.goal()), GOAL_CHAR);

    canvas.finish()
}

pub fn legend() -> String {
    format!(
        "{} spawn  {} goal  {} rock  {} geyser  {} solution  {} room",
        SPAWN_CHAR, GOAL_CHAR, ROCK_CHAR, GEYSER_CHAR, PATH_CHAR, ROOM_CHAR
    )
}

/// Print a maze to stdout.
pub fn print_maze(maze: &GeneratedMaze, mode: AsciiMode, solution: Option<&SolutionPath>) {
    println!("{}", render_maze_ascii(maze, mode, solution));
    if mode != AsciiMode::Walls {
        println!("{}", legend());
    }
}

/// Export a maze to a text file: header, map, then statistics.
pub fn export_maze_file(
    maze: &GeneratedMaze,
    solution: Option<&SolutionPath>,
    path: &str,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    let seeds = maze.seeds();

    writeln!(file, "=== ECHO MAZE FILE ===")?;
    writeln!(file, "Seed: {}", seeds.master)?;
    writeln!(file, "{}", seeds)?;
    writeln!(file, "Size: {}x{}", maze.rows(), maze.cols())?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    let mode = if solution.is_some() {
        AsciiMode::Solution
    } else {
        AsciiMode::Obstacles
    };
    writeln!(file, "=== MAP ({}) ===", mode.name())?;
    write!(file, "{}", render_maze_ascii(maze, mode, solution))?;
    writeln!(file, "{}", legend())?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    let report = maze.carve_report();
    writeln!(file, "Carved cells: {}", report.visited)?;
    writeln!(file, "Dead ends: {}", report.dead_ends.len())?;
    writeln!(file, "Rocks: {}", maze.rocks().len())?;
    for rock in maze.rocks() {
        let dirs: Vec<&str> = rock.push_directions.iter().map(|d| d.name()).collect();
        writeln!(file, "  {} pushable {}", rock.cell, dirs.join("/"))?;
    }
    writeln!(file, "Geysers: {}", maze.geysers().len())?;
    for geyser in maze.geysers() {
        writeln!(file, "  {} {}", geyser.cell, geyser.direction)?;
    }
    if let Some(solution) = solution {
        writeln!(file, "Solution length: {} cells", solution.len())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::generator::generate_maze;

    #[test]
    fn test_render_dimensions_and_border() {
        let maze = generate_maze(&MazeConfig::default()).unwrap();
        let text = render_maze_ascii(&maze, AsciiMode::Walls, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 21);
        assert!(lines.iter().all(|l| l.chars().count() == 21));
        assert_eq!(lines[0], "+-".repeat(10) + "+");
        assert_eq!(lines[20], "+-".repeat(10) + "+");
        // Goal (8, 8) is drawn on text line 2 * (10 - 1 - 8) + 1 = 3.
        assert_eq!(lines[3].chars().nth(17), Some(GOAL_CHAR));
        // Spawn (1, 1) on line 17.
        assert_eq!(lines[17].chars().nth(3), Some(SPAWN_CHAR));
    }

    #[test]
    fn test_solution_overlay() {
        let maze = generate_maze(&MazeConfig::default()).unwrap();
        let solution = maze.solve_from(maze.spawn()).unwrap();
        let text = render_maze_ascii(&maze, AsciiMode::Solution, Some(&solution));
        let plain = render_maze_ascii(&maze, AsciiMode::Walls, Some(&solution));

        assert!(text.contains(PATH_CHAR));
        assert!(!plain.contains(PATH_CHAR));
    }

    #[test]
    fn test_export_file() {
        let maze = generate_maze(&MazeConfig::default()).unwrap();
        let path = std::env::temp_dir().join(format!("echo_maze_export_{}.txt", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        export_maze_file(&maze, None, &path_str).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let solution = maze.solve_from(maze.spawn()).unwrap();
        export_maze_file(&maze, Some(&solution), &path_str).unwrap();
        let solved = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(solved.contains("=== MAP (Solution) ==="));
        assert!(solved.contains("Solution length:"));

        assert!(text.starts_with("=== ECHO MAZE FILE ==="));
        assert!(text.contains("Seed: 12345"));
        assert!(text.contains("=== MAP (Obstacles) ==="));
        assert!(text.contains("=== STATISTICS ==="));
    }
}
