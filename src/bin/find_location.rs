// Find Location
//
// Generates a noise map, picks a random start and goal on the floor,
// plans an A* route between them and plots the result.

use std::fs;
use std::path::Path;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use grid_astar::utils::{DisplayLayout, GridVisualizer};
use grid_astar::{find_location, FindLocationConfig, GridResult, NoiseGridConfig};

#[derive(Parser, Debug)]
#[command(name = "find_location")]
#[command(about = "Plan an A* route across a randomly generated noise map", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 37)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 18)]
    height: usize,

    /// Seed for the random generator (fresh entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maps to try before giving up
    #[arg(long, default_value_t = 100)]
    max_attempts: usize,

    /// PNG file to write the plot to
    #[arg(short, long, default_value = "img/find_location.png")]
    output: String,

    /// Also open an interactive gnuplot window
    #[arg(long)]
    show: bool,
}

fn run(args: &Args) -> GridResult<()> {
    let config = FindLocationConfig {
        grid: NoiseGridConfig {
            width: args.width,
            height: args.height,
            ..Default::default()
        },
        max_attempts: args.max_attempts,
        ..Default::default()
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let layout: DisplayLayout = config.planner.layout;
    let mut vis = GridVisualizer::new(layout);
    let route = find_location(&config, &mut rng, &mut vis)?;
    info!(
        seed = route.seed,
        attempts = route.attempts,
        start = ?(route.start.x, route.start.y),
        goal = ?(route.goal.x, route.goal.y),
        waypoints = route.path.len(),
        "route planned"
    );

    vis.set_title(&format!("A* route (map seed {})", route.seed));

    if let Some(parent) = Path::new(&args.output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let (canvas_w, canvas_h) = layout.canvas_size(args.width, args.height);
    let scale = (800.0 / canvas_w).max(1.0);
    vis.save_png(&args.output, (canvas_w * scale) as u32, (canvas_h * scale) as u32 + 60)?;
    info!(
        path = %args.output,
        cells = vis.cell_count(),
        markers = vis.marker_count(),
        "plot saved"
    );

    if args.show {
        vis.show()?;
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("grid_astar=info,find_location=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
