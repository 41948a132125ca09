//! Batch validation: generate many mazes in parallel and check that every one
//! is connected, solvable and structurally sound.

use anyhow::{bail, Result};
use clap::Parser;
use rayon::prelude::*;

use echo_maze::grid::Direction;
use echo_maze::{generate_maze, GeneratedMaze, MazeConfig};

#[derive(Parser, Debug)]
#[command(name = "maze_stats")]
#[command(about = "Generate a batch of mazes and report structural statistics")]
struct Args {
    /// Number of mazes to generate
    #[arg(short = 'n', long, default_value = "100")]
    count: u64,

    /// First seed; seeds run consecutively from here
    #[arg(long, default_value = "0")]
    start_seed: u64,

    #[arg(short, long, default_value = "10")]
    rows: usize,

    #[arg(short, long, default_value = "10")]
    columns: usize,

    /// Rock spawn probability
    #[arg(long, default_value = "1.0")]
    rock_chance: f32,

    /// Geyser spawn probability
    #[arg(long, default_value = "1.0")]
    geyser_chance: f32,
}

struct SeedStats {
    seed: u64,
    problems: Vec<String>,
    solution_len: usize,
    rocks: usize,
    geysers: usize,
    dead_ends: usize,
}

fn check(maze: &GeneratedMaze) -> Vec<String> {
    let grid = maze.grid();
    let mut problems = Vec::new();

    for (pos, dir) in grid.passage_consistency_violations() {
        problems.push(format!("wall flags disagree at {} {}", pos, dir));
    }

    for (pos, cell) in grid.iter() {
        let boundary = [
            (pos.row == 0, Direction::South),
            (pos.row + 1 == grid.rows(), Direction::North),
            (pos.col == 0, Direction::West),
            (pos.col + 1 == grid.cols(), Direction::East),
        ];
        for (on_edge, dir) in boundary {
            if on_edge && !cell.has_wall(dir) {
                problems.push(format!("perimeter open at {} {}", pos, dir));
            }
        }
    }

    let reached = grid.reachable_from(maze.spawn());
    let unreachable = reached.count_where(|r| !*r);
    if unreachable > 0 {
        problems.push(format!("{} cells unreachable from spawn", unreachable));
    }
    if grid.goal_count() != 1 {
        problems.push(format!("{} goal cells", grid.goal_count()));
    }

    let spacing = maze.config().rock_min_spacing;
    let rocks = maze.rocks();
    for (i, a) in rocks.iter().enumerate() {
        for b in &rocks[i + 1..] {
            if a.cell.manhattan(b.cell) < spacing {
                problems.push(format!("rocks {} and {} too close", a.cell, b.cell));
            }
        }
    }

    problems
}

fn run_seed(base: &MazeConfig, seed: u64) -> SeedStats {
    let config = MazeConfig {
        seed,
        full_random: false,
        ..base.clone()
    };

    match generate_maze(&config) {
        Ok(maze) => {
            let mut problems = check(&maze);
            let solution_len = match maze.solve_from(maze.spawn()) {
                Ok(solution) => solution.len(),
                Err(err) => {
                    problems.push(err.to_string());
                    0
                }
            };
            SeedStats {
                seed,
                problems,
                solution_len,
                rocks: maze.rocks().len(),
                geysers: maze.geysers().len(),
                dead_ends: maze.carve_report().dead_ends.len(),
            }
        }
        Err(err) => SeedStats {
            seed,
            problems: vec![err.to_string()],
            solution_len: 0,
            rocks: 0,
            geysers: 0,
            dead_ends: 0,
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = MazeConfig {
        rows: args.rows,
        columns: args.columns,
        rock_spawn_chance: args.rock_chance,
        geyser_spawn_chance: args.geyser_chance,
        ..Default::default()
    };
    base.validate()?;

    println!(
        "Generating {} mazes of {}x{} from seed {}...",
        args.count, args.rows, args.columns, args.start_seed
    );

    let stats: Vec<SeedStats> = (args.start_seed..args.start_seed + args.count)
        .into_par_iter()
        .map(|seed| run_seed(&base, seed))
        .collect();

    let n = stats.len().max(1) as f64;
    let mean = |f: fn(&SeedStats) -> usize| stats.iter().map(f).sum::<usize>() as f64 / n;

    println!("Mean solution length: {:.1} cells", mean(|s| s.solution_len));
    println!("Mean rocks: {:.2}", mean(|s| s.rocks));
    println!("Mean geysers: {:.2}", mean(|s| s.geysers));
    println!("Mean dead ends: {:.1}", mean(|s| s.dead_ends));

    let failures: Vec<&SeedStats> = stats.iter().filter(|s| !s.problems.is_empty()).collect();
    for failure in &failures {
        println!("Seed {}:", failure.seed);
        for problem in &failure.problems {
            println!("  {}", problem);
        }
    }

    if !failures.is_empty() {
        bail!("{} of {} mazes failed validation", failures.len(), stats.len());
    }

    println!("All {} mazes valid.", stats.len());
    Ok(())
}
