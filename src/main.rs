use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use echo_maze::ascii::{self, AsciiMode};
use echo_maze::export;
use echo_maze::{generate_maze, MazeConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    Walls,
    Obstacles,
    Solution,
}

impl From<View> for AsciiMode {
    fn from(view: View) -> Self {
        match view {
            View::Walls => AsciiMode::Walls,
            View::Obstacles => AsciiMode::Obstacles,
            View::Solution => AsciiMode::Solution,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "echo_maze")]
#[command(about = "Generate maze levels with rocks, geysers and an echolocation solver")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of grid rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Number of grid columns
    #[arg(short, long)]
    columns: Option<usize>,

    /// Master seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Draw the master seed from the OS
    #[arg(long)]
    random: bool,

    /// Skip the rock pass
    #[arg(long)]
    no_rocks: bool,

    /// Skip the geyser pass
    #[arg(long)]
    no_geysers: bool,

    /// ASCII view to print
    #[arg(long, value_enum, default_value = "obstacles")]
    view: View,

    /// Solve from this world x (defaults to the start room)
    #[arg(long, requires = "from_z", allow_hyphen_values = true)]
    from_x: Option<f32>,

    /// Solve from this world z
    #[arg(long, requires = "from_x", allow_hyphen_values = true)]
    from_z: Option<f32>,

    /// Evaluate an echolocation hint facing along this world x
    #[arg(long, allow_hyphen_values = true)]
    facing_x: Option<f32>,

    /// Evaluate an echolocation hint facing along this world z
    #[arg(long, allow_hyphen_values = true)]
    facing_z: Option<f32>,

    /// Export the maze to a text file
    #[arg(long)]
    export: Option<String>,

    /// Export a PNG preview
    #[arg(long)]
    png: Option<String>,

    /// Pixels per cell for the PNG preview
    #[arg(long, default_value = "16")]
    cell_px: u32,

    /// Export a distance-to-goal heat map PNG
    #[arg(long)]
    distance_map: Option<String>,

    /// Write the world-space spawn layout as JSON
    #[arg(long)]
    layout_json: Option<String>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn build_config(args: &Args) -> Result<MazeConfig> {
    let mut config = match &args.config {
        Some(path) => MazeConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => MazeConfig::default(),
    };

    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
        config.full_random = false;
    }
    if args.random {
        config.full_random = true;
    }
    if args.no_rocks {
        config.enable_rocks = false;
    }
    if args.no_geysers {
        config.enable_geysers = false;
    }

    config.validate().context("invalid maze configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    println!("Generating {}x{} maze...", config.rows, config.columns);
    let maze = generate_maze(&config).context("maze generation failed")?;
    let seeds = maze.seeds();
    println!("Seed: {}", seeds.master);
    println!(
        "Carved {} cells ({} dead ends), placed {} rocks and {} geysers",
        maze.carve_report().visited,
        maze.carve_report().dead_ends.len(),
        maze.rocks().len(),
        maze.geysers().len()
    );

    let metrics = maze.metrics();
    let position = match (args.from_x, args.from_z) {
        (Some(x), Some(z)) => [x, 0.0, z],
        _ => metrics.grid_to_world(maze.spawn(), 0.0),
    };

    println!("Solving from world ({:.1}, {:.1})...", position[0], position[2]);
    let solution = maze.find_path(position).context("no route to the goal")?;
    println!(
        "Solution: {} cells from {} to {}",
        solution.len(),
        solution.start().unwrap_or_default(),
        solution.goal().unwrap_or_default()
    );

    println!();
    ascii::print_maze(&maze, args.view.into(), Some(&solution));

    if args.facing_x.is_some() || args.facing_z.is_some() {
        let facing = [args.facing_x.unwrap_or(0.0), 0.0, args.facing_z.unwrap_or(0.0)];
        let oracle = maze.hint_oracle(&solution);
        let hint = oracle.evaluate(position, facing);
        println!(
            "Echolocation: {} ({:?})",
            if hint.positive { "green" } else { "red" },
            hint.reason
        );
    }

    if let Some(path) = &args.export {
        println!("Exporting maze to {}...", path);
        ascii::export_maze_file(&maze, Some(&solution), path)
            .with_context(|| format!("writing {}", path))?;
    }

    if let Some(path) = &args.png {
        println!("Exporting preview to {}...", path);
        export::export_maze_png(&maze, Some(&solution), args.cell_px, path)
            .with_context(|| format!("writing {}", path))?;
    }

    if let Some(path) = &args.distance_map {
        println!("Exporting distance map to {}...", path);
        export::export_distance_map(&maze, path).with_context(|| format!("writing {}", path))?;
    }

    if let Some(path) = &args.layout_json {
        println!("Writing spawn layout to {}...", path);
        let json = serde_json::to_string_pretty(&maze.layout())?;
        fs::write(path, json).with_context(|| format!("writing {}", path))?;
    }

    println!("Done!");
    Ok(())
}
