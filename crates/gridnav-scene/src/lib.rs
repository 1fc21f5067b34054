//! Scene utilities for gridnav: box geometry, walkability probing, random
//! obstacles and random route queries.

mod endpoints;
mod error;
mod obstacles;
mod scene;

pub use endpoints::{DEFAULT_PAIR_ATTEMPTS, plan_random_route, random_walkable_pair};
pub use error::SceneError;
pub use obstacles::{ObstacleConfig, spawn_obstacles};
pub use scene::{Aabb, ProbeConfig, Scene, SceneProbe};
