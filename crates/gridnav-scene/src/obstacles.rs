//! Random obstacle placement.

use gridnav_core::{NavGrid, WorldPos};
use rand::Rng;

use crate::Aabb;

/// Parameters for [`spawn_obstacles`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleConfig {
    /// Number of boxes to place.
    pub count: usize,
    /// Side length of an unscaled box.
    pub unit_size: f64,
    /// Horizontal scale is drawn uniformly from `[min_scale, max_scale)`
    /// on each axis independently.
    pub min_scale: f64,
    pub max_scale: f64,
    /// Fixed vertical scale.
    pub height: f64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            count: 10,
            unit_size: 100.0,
            min_scale: 1.0,
            max_scale: 5.0,
            height: 3.0,
        }
    }
}

/// Place `config.count` boxes with centers drawn uniformly over the grid's
/// rectangle, on the grid plane. Boxes may overlap each other and stick out
/// past the grid edges.
pub fn spawn_obstacles(grid: &NavGrid, config: &ObstacleConfig, rng: &mut impl Rng) -> Vec<Aabb> {
    let lo = grid.bottom_left();
    let hi = grid.top_right();
    let (min_scale, max_scale) = if config.min_scale < config.max_scale {
        (config.min_scale, config.max_scale)
    } else {
        (config.max_scale, config.min_scale)
    };

    let mut boxes = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let center = WorldPos::new(sample(rng, lo.x, hi.x), sample(rng, lo.y, hi.y), lo.z);
        let sx = sample(rng, min_scale, max_scale);
        let sy = sample(rng, min_scale, max_scale);
        let half = WorldPos::new(
            sx * config.unit_size * 0.5,
            sy * config.unit_size * 0.5,
            config.height * config.unit_size * 0.5,
        );
        boxes.push(Aabb::from_center(center, half));
    }
    log::debug!("spawned {} obstacles", boxes.len());
    boxes
}

// random_range panics on an empty range.
#[inline]
fn sample(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    if lo < hi { rng.random_range(lo..hi) } else { lo }
}
