use std::collections::VecDeque;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::generator::GeneratedMaze;
use crate::grid::{Direction, Grid, GridPos};
use crate::pathfinding::SolutionPath;
use crate::tilemap::Tilemap;

const FLOOR: [u8; 3] = [235, 228, 210];
const WALL: [u8; 3] = [40, 40, 48];
const ROOM: [u8; 3] = [200, 215, 235];
const PATH: [u8; 3] = [120, 200, 120];
const ROCK: [u8; 3] = [120, 100, 80];
const GEYSER: [u8; 3] = [90, 170, 230];
const GOAL: [u8; 3] = [230, 190, 60];

/// Render the maze top-down, north up, `cell_px` pixels per cell.
pub fn render_maze_image(
    maze: &GeneratedMaze,
    solution: Option<&SolutionPath>,
    cell_px: u32,
) -> RgbImage {
    let grid = maze.grid();
    let cell_px = cell_px.max(3);
    let width = grid.cols() as u32 * cell_px + 1;
    let height = grid.rows() as u32 * cell_px + 1;
    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb(FLOOR));

    // Top-left pixel of a cell, with rows flipped so north is up.
    let origin = |pos: GridPos| {
        (
            pos.col as u32 * cell_px,
            (grid.rows() - 1 - pos.row) as u32 * cell_px,
        )
    };

    let fill = |img: &mut RgbImage, pos: GridPos, color: [u8; 3], inset: u32| {
        let (x0, y0) = origin(pos);
        for y in y0 + inset..y0 + cell_px - inset {
            for x in x0 + inset..x0 + cell_px - inset {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    };

    for room in [maze.rooms().start, maze.rooms().end] {
        for pos in room.cells() {
            fill(&mut img, pos, ROOM, 0);
        }
    }
    if let Some(solution) = solution {
        for &pos in solution.cells() {
            fill(&mut img, pos, PATH, cell_px / 4);
        }
    }
    for rock in maze.rocks() {
        fill(&mut img, rock.cell, ROCK, cell_px / 3);
    }
    fill(&mut img, maze.goal(), GOAL, cell_px / 4);

    for (pos, cell) in grid.iter() {
        let (x0, y0) = origin(pos);
        let (x1, y1) = (x0 + cell_px, y0 + cell_px);
        for dir in Direction::ALL {
            if !cell.has_wall(dir) {
                continue;
            }
            match dir {
                Direction::North => (x0..=x1).for_each(|x| img.put_pixel(x, y0, Rgb(WALL))),
                Direction::South => (x0..=x1).for_each(|x| img.put_pixel(x, y1, Rgb(WALL))),
                Direction::West => (y0..=y1).for_each(|y| img.put_pixel(x0, y, Rgb(WALL))),
                Direction::East => (y0..=y1).for_each(|y| img.put_pixel(x1, y, Rgb(WALL))),
            }
        }
    }

    // Geysers straddle the doorway they block.
    for geyser in maze.geysers() {
        let (x0, y0) = origin(geyser.cell);
        let half = cell_px / 2;
        let (cx, cy) = match geyser.direction {
            Direction::North => (x0 + half, y0),
            Direction::South => (x0 + half, y0 + cell_px),
            Direction::East => (x0 + cell_px, y0 + half),
            Direction::West => (x0, y0 + half),
        };
        let r = (cell_px / 5).max(1);
        for y in cy.saturating_sub(r)..=(cy + r).min(height - 1) {
            for x in cx.saturating_sub(r)..=(cx + r).min(width - 1) {
                img.put_pixel(x, y, Rgb(GEYSER));
            }
        }
    }

    img
}

/// Export the maze preview as a PNG.
pub fn export_maze_png(
    maze: &GeneratedMaze,
    solution: Option<&SolutionPath>,
    cell_px: u32,
    path: &str,
) -> Result<(), image::ImageError> {
    render_maze_image(maze, solution, cell_px).save(path)
}

/// Walking distance from `from` to every cell; `None` where unreachable.
pub fn distance_field(grid: &Grid, from: GridPos) -> Tilemap<Option<u32>> {
    let mut dist: Tilemap<Option<u32>> = Tilemap::new(grid.rows(), grid.cols());
    if !grid.contains(from) {
        return dist;
    }
    dist.set(from.row, from.col, Some(0));
    let mut queue = VecDeque::from([from]);

    while let Some(pos) = queue.pop_front() {
        let here = dist.get(pos.row, pos.col).copied().flatten().unwrap_or(0);
        for dir in Direction::ALL {
            if !grid.can_move(pos, dir) {
                continue;
            }
            if let Some(next) = grid.neighbor(pos, dir) {
                if dist.get(next.row, next.col) == Some(&None) {
                    dist.set(next.row, next.col, Some(here + 1));
                    queue.push_back(next);
                }
            }
        }
    }

    dist
}

/// Export a distance-to-goal heat map, one pixel per cell, north up.
pub fn export_distance_map(maze: &GeneratedMaze, path: &str) -> Result<(), image::ImageError> {
    let grid = maze.grid();
    let dist = distance_field(grid, maze.goal());
    let max = dist.iter().filter_map(|(_, _, d)| *d).max().unwrap_or(1).max(1) as f32;

    let mut img: RgbImage = ImageBuffer::new(grid.cols() as u32, grid.rows() as u32);
    for (row, col, d) in dist.iter() {
        let color = match d {
            Some(d) => spectral_colormap(*d as f32 / max),
            None => [0, 0, 0],
        };
        img.put_pixel(col as u32, (grid.rows() - 1 - row) as u32, Rgb(color));
    }

    img.save(path)
}

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],
        [0.20, 0.53, 0.74],
        [0.40, 0.76, 0.65],
        [0.67, 0.87, 0.64],
        [0.90, 0.96, 0.60],
        [1.00, 1.00, 0.75],
        [1.00, 0.88, 0.55],
        [0.99, 0.68, 0.38],
        [0.96, 0.43, 0.26],
        [0.84, 0.24, 0.31],
        [0.62, 0.00, 0.26],
    ];

    let t_scaled = t.clamp(0.0, 1.0) * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}
