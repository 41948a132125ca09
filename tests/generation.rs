use echo_maze::ascii::{render_maze_ascii, AsciiMode};
use echo_maze::carve_maze;
use echo_maze::grid::{Direction, Grid, GridPos};
use echo_maze::rooms::{Room, RoomLayout};
use echo_maze::{generate_maze, generate_with_seeds, MazeConfig, MazeError, MazeSeeds};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn full_spawn_config(seed: u64) -> MazeConfig {
    MazeConfig {
        seed,
        rock_spawn_chance: 1.0,
        geyser_spawn_chance: 1.0,
        ..Default::default()
    }
}

fn assert_perimeter_closed(grid: &Grid) {
    for (pos, cell) in grid.iter() {
        if pos.row == 0 {
            assert!(cell.wall_south, "open south edge at {}", pos);
        }
        if pos.row + 1 == grid.rows() {
            assert!(cell.wall_north, "open north edge at {}", pos);
        }
        if pos.col == 0 {
            assert!(cell.wall_west, "open west edge at {}", pos);
        }
        if pos.col + 1 == grid.cols() {
            assert!(cell.wall_east, "open east edge at {}", pos);
        }
    }
}

/// Walls crossing a room's boundary toward in-grid cells that are open.
fn open_exits(grid: &Grid, room: &Room) -> Vec<(GridPos, Direction)> {
    let mut exits = Vec::new();
    for pos in room.cells() {
        for dir in Direction::ALL {
            if let Some(next) = grid.neighbor(pos, dir) {
                if !room.contains(next) && grid.can_move(pos, dir) {
                    exits.push((pos, dir));
                }
            }
        }
    }
    exits
}

#[test]
fn hundred_mazes_stay_solvable_after_placement() {
    for seed in 0..100 {
        let config = full_spawn_config(seed);
        let maze = generate_maze(&config).unwrap();

        let mut bare = config.clone();
        bare.enable_rocks = false;
        bare.enable_geysers = false;
        let bare = generate_maze(&bare).unwrap();

        // Placement never touches walls.
        assert_eq!(maze.grid(), bare.grid(), "seed {}", seed);

        let solution = maze.solve_from(maze.spawn()).unwrap();
        assert_eq!(solution.start(), Some(maze.spawn()));
        assert_eq!(solution.goal(), Some(maze.goal()));
    }
}

#[test]
fn generated_grids_hold_structural_invariants() {
    for seed in 0..40 {
        let maze = generate_maze(&full_spawn_config(seed)).unwrap();
        let grid = maze.grid();
        let rooms = maze.rooms();

        assert!(grid.passage_consistency_violations().is_empty());
        assert_perimeter_closed(grid);

        // Every cell reachable from the start room.
        assert_eq!(grid.reachable_from(rooms.spawn()).count_where(|r| !*r), 0);

        // Exactly one goal, at the end room center.
        assert_eq!(grid.goal_count(), 1);
        assert_eq!(grid.goal(), Some(GridPos::new(8, 8)));

        for room in [rooms.start, rooms.end] {
            for pos in room.cells() {
                for dir in Direction::ALL {
                    if let Some(next) = grid.neighbor(pos, dir) {
                        if room.contains(next) {
                            assert!(grid.can_move(pos, dir), "closed room wall at {} {}", pos, dir);
                        }
                    }
                }
            }
        }
        assert_eq!(
            open_exits(grid, &rooms.start),
            vec![(rooms.start_seam.room_cell, rooms.start_seam.direction)]
        );
        assert_eq!(
            open_exits(grid, &rooms.end),
            vec![(rooms.end_seam.room_cell, rooms.end_seam.direction)]
        );
    }
}

#[test]
fn non_room_cells_reachable_from_carve_seed_without_rooms() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let (grid, layout, report) = carve_maze(12, 9, &mut rng).unwrap();

    let reached = grid.reachable_from(layout.carve_seed);
    for pos in grid.positions() {
        assert_eq!(reached.get(pos.row, pos.col), Some(&true));
    }
    assert_eq!(report.visited, 12 * 9 - 18);
}

#[test]
fn rocks_respect_spacing() {
    for seed in 0..50 {
        let config = MazeConfig {
            rows: 20,
            columns: 20,
            ..full_spawn_config(seed)
        };
        let maze = generate_maze(&config).unwrap();
        let rocks = maze.rocks();
        assert!(rocks.len() <= 8);
        for (i, a) in rocks.iter().enumerate() {
            for b in &rocks[i + 1..] {
                assert!(a.cell.manhattan(b.cell) >= config.rock_min_spacing);
            }
        }
        for geyser in maze.geysers() {
            assert!(rocks.iter().all(|r| r.cell != geyser.key));
        }
    }
}

#[test]
fn same_seed_same_maze() {
    let config = full_spawn_config(2024);
    let a = generate_maze(&config).unwrap();
    let b = generate_maze(&config).unwrap();

    assert_eq!(
        render_maze_ascii(&a, AsciiMode::Obstacles, None),
        render_maze_ascii(&b, AsciiMode::Obstacles, None)
    );
    assert_eq!(a.rocks(), b.rocks());
    assert_eq!(a.geysers(), b.geysers());

    let other = generate_maze(&full_spawn_config(2025)).unwrap();
    assert_ne!(
        render_maze_ascii(&a, AsciiMode::Walls, None),
        render_maze_ascii(&other, AsciiMode::Walls, None)
    );
}

#[test]
fn overriding_rock_seed_keeps_walls() {
    let config = full_spawn_config(9);
    let base = MazeSeeds::from_master(9);
    let tweaked = MazeSeeds::builder(9).rocks(1).build();

    let a = generate_with_seeds(&config, base).unwrap();
    let b = generate_with_seeds(&config, tweaked).unwrap();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn small_grids_are_rejected() {
    for (rows, columns) in [(5, 5), (6, 6), (2, 10), (10, 3)] {
        let config = MazeConfig {
            rows,
            columns,
            ..Default::default()
        };
        assert!(
            matches!(generate_maze(&config), Err(MazeError::InvalidConfiguration { .. })),
            "{}x{} should be rejected",
            rows,
            columns
        );
    }
    assert!(RoomLayout::for_extent(5, 5).is_err());
}

#[test]
fn get_cell_is_read_only() {
    let maze = generate_maze(&MazeConfig::default()).unwrap();
    let first = *maze.get_cell(4, 5).unwrap();
    let second = *maze.get_cell(4, 5).unwrap();
    assert_eq!(first, second);
    assert!(matches!(
        maze.get_cell(10, 0),
        Err(MazeError::OutOfRange { row: 10, col: 0, .. })
    ));
}

#[test]
fn world_position_solving_and_hints() {
    let maze = generate_maze(&MazeConfig::default()).unwrap();
    let metrics = maze.metrics();

    // Far outside the grid clamps to a corner cell and still solves.
    let solution = maze.find_path([-100.0, 0.0, -100.0]).unwrap();
    assert_eq!(solution.start(), Some(GridPos::new(0, 0)));

    let oracle = maze.hint_oracle(&solution);
    for &pos in solution.cells() {
        let hint = oracle.evaluate(metrics.grid_to_world(pos, 0.0), [1.0, 0.0, 0.0]);
        assert!(hint.positive);
        if let Some(dir) = solution.suggested_direction(pos) {
            assert!(maze.grid().can_move(pos, dir));
        }
    }
}
