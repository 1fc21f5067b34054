//! Shared model for the gridnav demo: build a scene with random obstacles,
//! classify the grid against it, plan a route between two random walkable
//! cells and draw the result as ASCII.

use gridnav_core::{GridConfig, GridError, NavGrid, Point, StoredWalkability, WorldPos};
use gridnav_paths::{Path, Pathfinder, SearchStats};
use gridnav_scene::{
    DEFAULT_PAIR_ATTEMPTS, ObstacleConfig, ProbeConfig, Scene, SceneError, SceneProbe,
    plan_random_route, spawn_obstacles,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FLOOR: char = '.';
pub const BLOCKED: char = '#';
pub const ROUTE: char = '*';
pub const START: char = 'S';
pub const TARGET: char = 'T';

/// Everything the demo needs; loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid: GridConfig,
    pub obstacles: ObstacleConfig,
    pub probe: ProbeConfig,
    /// Thickness of the ground slab under the grid.
    pub floor_thickness: f64,
    /// Fixed seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    pub max_attempts: usize,
    pub max_expansions: Option<usize>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                size_x: 40,
                size_y: 20,
                radius: 25.0,
                origin: WorldPos::ZERO,
            },
            obstacles: ObstacleConfig {
                count: 12,
                ..ObstacleConfig::default()
            },
            probe: ProbeConfig::default(),
            floor_thickness: 10.0,
            seed: None,
            max_attempts: DEFAULT_PAIR_ATTEMPTS,
            max_expansions: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Config(#[from] serde_json::Error),
}

impl DemoConfig {
    pub fn from_json(text: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Result of one demo run.
#[derive(Debug)]
pub struct Outcome {
    pub seed: u64,
    pub grid: NavGrid,
    pub scene: Scene,
    pub route: Result<Path, SceneError>,
    pub stats: SearchStats,
}

/// Build the world described by `config` and plan one random route on it.
///
/// Only an invalid grid configuration is an error here; a failed route is
/// part of the [`Outcome`].
pub fn run(config: &DemoConfig) -> Result<Outcome, DemoError> {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("seed {}", seed);

    let mut grid = NavGrid::build(config.grid)?;
    let mut scene = Scene::with_floor(&grid, config.floor_thickness);
    scene
        .obstacles
        .extend(spawn_obstacles(&grid, &config.obstacles, &mut rng));

    let probe = SceneProbe::new(&scene, &grid, config.probe);
    let walkable = grid.refresh_walkability(&probe);
    log::info!("{}/{} cells walkable", walkable, grid.len());

    let (route, stats) = {
        let mut pf = Pathfinder::for_grid(&grid);
        pf.set_max_expansions(config.max_expansions);
        let route = plan_random_route(&mut pf, &StoredWalkability, &mut rng, config.max_attempts);
        (route, pf.stats())
    };

    Ok(Outcome {
        seed,
        grid,
        scene,
        route,
        stats,
    })
}

/// Draw `grid` with the highest row first, so +Y points up.
pub fn render_ascii(grid: &NavGrid, path: Option<&Path>) -> String {
    let w = grid.size_x().max(0) as usize;
    let h = grid.size_y().max(0) as usize;
    let mut rows = vec![Vec::with_capacity(w); h];
    for cell in grid.cells() {
        let row = h - 1 - cell.iy() as usize;
        rows[row].push(if cell.is_walkable() { FLOOR } else { BLOCKED });
    }

    if let Some(path) = path {
        let mut mark = |p: Point, c: char| {
            if grid.bounds().contains(p) {
                rows[h - 1 - p.y as usize][p.x as usize] = c;
            }
        };
        for &p in path {
            mark(p, ROUTE);
        }
        if let Some(p) = path.start() {
            mark(p, START);
        }
        if let Some(p) = path.target() {
            mark(p, TARGET);
        }
    }

    let mut out = String::with_capacity((w + 1) * h);
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
