//! Terminal demo: scatter obstacles over a floor, plan a route between two
//! random walkable cells and print the map.
//!
//! Run: cargo run --bin gridnav-demo -- --seed 7 -v

use std::path::PathBuf;

use clap::Parser;
use gridnav_demos::{BLOCKED, DemoConfig, FLOOR, ROUTE, START, TARGET, render_ascii, run};

#[derive(Parser, Debug)]
#[command(name = "gridnav-demo")]
#[command(about = "A* route across a randomly obstructed grid", long_about = None)]
struct Args {
    /// JSON file with a full or partial demo configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells along X
    #[arg(long)]
    size_x: Option<i32>,

    /// Cells along Y
    #[arg(long)]
    size_y: Option<i32>,

    /// Half the side length of a cell
    #[arg(long)]
    radius: Option<f64>,

    /// Number of obstacles to spawn
    #[arg(short = 'n', long)]
    obstacles: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cap on expanded cells per search
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut DemoConfig) {
        if let Some(v) = self.size_x {
            config.grid.size_x = v;
        }
        if let Some(v) = self.size_y {
            config.grid.size_y = v;
        }
        if let Some(v) = self.radius {
            config.grid.radius = v;
        }
        if let Some(v) = self.obstacles {
            config.obstacles.count = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_expansions.is_some() {
            config.max_expansions = self.max_expansions;
        }
    }
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        "gridnav_core=debug,gridnav_paths=debug,gridnav_scene=debug,gridnav_demos=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => match DemoConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => DemoConfig::default(),
    };
    args.apply(&mut config);

    let outcome = match run(&config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    print!("{}", render_ascii(&outcome.grid, outcome.route.as_ref().ok()));
    println!(
        "{FLOOR} floor  {BLOCKED} blocked  {ROUTE} route  {START} start  {TARGET} target"
    );
    println!(
        "seed {}  obstacles {}  walkable {}/{}",
        outcome.seed,
        outcome.scene.obstacles.len(),
        outcome.grid.walkable_count(),
        outcome.grid.len()
    );

    match outcome.route {
        Ok(path) => println!(
            "route {} cells, cost {}, {} expanded in {:.3} ms",
            path.len(),
            path.cost(),
            outcome.stats.expanded,
            outcome.stats.elapsed.as_secs_f64() * 1000.0
        ),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
