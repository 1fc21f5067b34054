//! Random route queries between walkable cells.

use gridnav_core::{NavGrid, Point, Traversability, WorldPos};
use gridnav_paths::{Path, PathError, Pathfinder};
use rand::Rng;

use crate::SceneError;

/// Default number of draws before [`random_walkable_pair`] gives up.
pub const DEFAULT_PAIR_ATTEMPTS: usize = 1000;

/// Draw world positions uniformly over the grid rectangle until both a start
/// and a target resolve to cells `eval` accepts.
///
/// Each attempt draws a fresh pair; a pair is rejected as a whole if either
/// end is unwalkable. The two cells may coincide.
pub fn random_walkable_pair<T: Traversability + ?Sized>(
    grid: &NavGrid,
    eval: &T,
    rng: &mut impl Rng,
    max_attempts: usize,
) -> Result<(Point, Point), SceneError> {
    for attempt in 1..=max_attempts {
        let start = draw_walkable(grid, eval, rng);
        let target = draw_walkable(grid, eval, rng);
        if let (Some(s), Some(t)) = (start, target) {
            log::trace!("walkable pair {} -> {} after {} attempts", s, t, attempt);
            return Ok((s, t));
        }
    }
    log::warn!("no walkable pair after {} attempts", max_attempts);
    Err(SceneError::NoWalkablePair {
        attempts: max_attempts,
    })
}

/// Pick a random walkable pair on the pathfinder's grid and search between
/// them.
pub fn plan_random_route<T: Traversability + ?Sized>(
    pf: &mut Pathfinder<'_>,
    eval: &T,
    rng: &mut impl Rng,
    max_attempts: usize,
) -> Result<Path, SceneError> {
    let grid = pf.grid().ok_or(PathError::GridUnset)?;
    let (start, target) = random_walkable_pair(grid, eval, rng, max_attempts)?;
    log::info!("planning route {} -> {}", start, target);
    Ok(pf.find_path(start, target, eval)?)
}

/// One uniform draw over the grid rectangle, kept only if walkable.
fn draw_walkable<T: Traversability + ?Sized>(
    grid: &NavGrid,
    eval: &T,
    rng: &mut impl Rng,
) -> Option<Point> {
    let lo = grid.bottom_left();
    let hi = grid.top_right();
    let pos = WorldPos::new(
        rng.random_range(lo.x..=hi.x),
        rng.random_range(lo.y..=hi.y),
        lo.z,
    );
    let cell = grid.cell_from_world_position(pos)?;
    eval.is_walkable(cell).then(|| cell.pos())
}
