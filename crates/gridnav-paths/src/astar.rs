use std::time::Instant;

use gridnav_core::{NavGrid, Point, Traversability, WorldPos};

use crate::distance::octile;
use crate::pathfinder::{NodeStatus, SearchState};
use crate::{Path, PathError, Pathfinder};

impl<'g> Pathfinder<'g> {
    /// Compute the cheapest octile route from `start` to `target` using A*.
    ///
    /// `eval` is asked about every neighbor the search considers; cells it
    /// rejects are never entered. The endpoints themselves are not checked:
    /// an unwalkable start is still expanded, an unwalkable target is never
    /// reached.
    ///
    /// Among open cells with equal `f` the one with the lower `h` is expanded
    /// first, and remaining ties go to the cell that was opened first.
    ///
    /// Returns the full path (including both endpoints). "No route" is
    /// [`PathError::NotFound`]; a missing grid or an out-of-bounds endpoint
    /// is reported before any state changes.
    pub fn find_path<T: Traversability + ?Sized>(
        &mut self,
        start: Point,
        target: Point,
        eval: &T,
    ) -> Result<Path, PathError> {
        let grid = self.grid.ok_or(PathError::GridUnset)?;
        let start_idx = grid.index(start).ok_or(PathError::InvalidCell(start))?;
        let target_idx = grid.index(target).ok_or(PathError::InvalidCell(target))?;

        let started = Instant::now();
        self.last_path = None;
        self.state = SearchState::Searching;
        self.stats.expanded = 0;
        self.open.clear();
        self.bump_generation();

        let outcome = self.search(grid, start_idx, target_idx, eval);

        self.stats.elapsed = started.elapsed();
        match outcome {
            Ok(path) => {
                log::debug!(
                    "path {} -> {}: {} cells, cost {}, {} expanded in {:.3} ms",
                    start,
                    target,
                    path.len(),
                    path.cost(),
                    self.stats.expanded,
                    self.stats.elapsed.as_secs_f64() * 1000.0
                );
                self.state = SearchState::Succeeded;
                self.last_path = Some(path.clone());
                Ok(path)
            }
            Err(err) => {
                log::debug!("path {} -> {} failed: {}", start, target, err);
                self.state = SearchState::Failed;
                Err(err)
            }
        }
    }

    /// Resolve two world positions through
    /// [`NavGrid::cell_from_world_position`] and search between the cells.
    ///
    /// A position outside the grid is [`PathError::Unresolved`].
    pub fn find_path_from_positions<T: Traversability + ?Sized>(
        &mut self,
        start_pos: WorldPos,
        target_pos: WorldPos,
        eval: &T,
    ) -> Result<Path, PathError> {
        let grid = self.grid.ok_or(PathError::GridUnset)?;
        let resolve = |pos: WorldPos| {
            grid.cell_from_world_position(pos)
                .map(|c| c.pos())
                .ok_or(PathError::Unresolved { pos })
        };
        let start = resolve(start_pos)?;
        let target = resolve(target_pos)?;
        self.find_path(start, target, eval)
    }

    fn search<T: Traversability + ?Sized>(
        &mut self,
        grid: &NavGrid,
        start_idx: usize,
        target_idx: usize,
        eval: &T,
    ) -> Result<Path, PathError> {
        let target = grid.point(target_idx);

        {
            let start = grid.point(start_idx);
            let n = self.fresh_node(start_idx);
            n.set_g_cost(0);
            n.set_h_cost(octile(start, target));
            n.set_parent(None);
        }
        self.push_open(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let result = 'search: loop {
            let Some(entry) = self.open.pop() else {
                break 'search Err(PathError::NotFound);
            };
            let ci = entry.idx;

            // Skip entries superseded by a cheaper push.
            let cn = &self.nodes[ci];
            if cn.generation != self.generation
                || cn.status != NodeStatus::Open
                || cn.f_cost() != entry.f
            {
                continue;
            }
            let current_g = cn.g_cost();

            self.nodes[ci].status = NodeStatus::Closed;

            if ci == target_idx {
                break 'search self.retrace(grid, start_idx, target_idx);
            }

            if let Some(max) = self.max_expansions {
                if self.stats.expanded >= max {
                    log::warn!(
                        "search budget of {} expansions exhausted before reaching {}",
                        max,
                        target
                    );
                    break 'search Err(PathError::BudgetExhausted {
                        expansions: self.stats.expanded,
                    });
                }
            }
            self.stats.expanded += 1;

            let cp = grid.point(ci);
            log::trace!("expand {} g={} f={}", cp, current_g, entry.f);

            nbuf.clear();
            grid.neighbors_into(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if !eval.is_walkable(&grid.cells()[ni]) {
                    continue;
                }
                let tentative_g = current_g + octile(cp, np);

                let n = self.fresh_node(ni);
                match n.status {
                    NodeStatus::Closed => continue,
                    NodeStatus::Open if tentative_g >= n.g_cost() => continue,
                    _ => {}
                }
                n.set_g_cost(tentative_g);
                n.set_h_cost(octile(np, target));
                n.set_parent(Some(cp));
                self.push_open(ni);
            }
        };

        self.nbuf = nbuf;
        result
    }

    /// Walk parent links back from the target and return the path in travel
    /// order.
    fn retrace(&self, grid: &NavGrid, start_idx: usize, target_idx: usize) -> Result<Path, PathError> {
        let mut cells = vec![grid.point(target_idx)];
        let mut ci = target_idx;
        while ci != start_idx {
            let at = grid.point(ci);
            let parent = self.nodes[ci]
                .parent()
                .and_then(|p| grid.index(p))
                .filter(|&pi| self.nodes[pi].generation == self.generation);
            let Some(pi) = parent.filter(|_| cells.len() < grid.len()) else {
                log::error!(
                    "parent chain from {} broken at {}",
                    grid.point(target_idx),
                    at
                );
                debug_assert!(false, "parent chain broken at {at}");
                return Err(PathError::BrokenParentChain { at });
            };
            cells.push(grid.point(pi));
            ci = pi;
        }
        cells.reverse();
        Ok(Path::new(cells, self.nodes[target_idx].g_cost()))
    }
}
