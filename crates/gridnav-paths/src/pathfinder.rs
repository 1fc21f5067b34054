use std::collections::BinaryHeap;
use std::time::Duration;

use gridnav_core::{NavGrid, Point};

use crate::Path;

// ---------------------------------------------------------------------------
// Per-run search scratch
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum NodeStatus {
    #[default]
    Unseen,
    Open,
    Closed,
}

/// Search bookkeeping for one cell during one A* run.
///
/// Records live in the [`Pathfinder`], keyed by the cell's linear index, and
/// are lazily reset between runs with a generation stamp, so nothing a
/// previous run wrote is ever read by the next one.
#[derive(Clone, Debug, Default)]
pub struct SearchNode {
    g_cost: i32,
    h_cost: i32,
    parent: Option<Point>,
    pub(crate) generation: u32,
    pub(crate) status: NodeStatus,
    // insertion order into the open set, the final tie-break
    pub(crate) seq: u64,
}

impl SearchNode {
    /// Cost of the best known route from the start to this cell.
    #[inline]
    pub fn g_cost(&self) -> i32 {
        self.g_cost
    }

    /// Estimated cost from this cell to the target.
    #[inline]
    pub fn h_cost(&self) -> i32 {
        self.h_cost
    }

    /// `g_cost + h_cost`.
    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }

    /// The cell this one was reached from, if any.
    #[inline]
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }

    #[inline]
    pub fn set_g_cost(&mut self, g: i32) {
        self.g_cost = g;
    }

    #[inline]
    pub fn set_h_cost(&mut self, h: i32) {
        self.h_cost = h;
    }

    #[inline]
    pub fn set_parent(&mut self, parent: Option<Point>) {
        self.parent = parent;
    }

    /// Discovered but not yet finalized.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == NodeStatus::Open
    }

    /// Finalized; never examined again in the same run.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }
}

/// Open-set entry, ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// `f`, then the lowest `h`, then the earliest inserted cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Where the pathfinder is in its run cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No run since the grid was attached.
    #[default]
    Idle,
    /// A run is in progress.
    Searching,
    /// The last run reached its target.
    Succeeded,
    /// The last run ended without reaching its target.
    Failed,
}

/// Counters for the most recent run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken off the open set and closed.
    pub expanded: usize,
    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// A* search over a [`NavGrid`].
///
/// The pathfinder borrows the grid and owns all per-run state (cost records,
/// open heap, neighbor buffer), so repeated queries reuse allocations and the
/// grid itself is never written during a search. Several pathfinders can
/// search the same grid at once.
#[derive(Debug, Default)]
pub struct Pathfinder<'g> {
    pub(crate) grid: Option<&'g NavGrid>,
    pub(crate) nodes: Vec<SearchNode>,
    pub(crate) generation: u32,
    pub(crate) next_seq: u64,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) nbuf: Vec<Point>,
    pub(crate) state: SearchState,
    pub(crate) stats: SearchStats,
    pub(crate) last_path: Option<Path>,
    pub(crate) max_expansions: Option<usize>,
}

impl<'g> Pathfinder<'g> {
    /// Create a pathfinder with no grid attached. Searches fail with
    /// [`PathError::GridUnset`](crate::PathError::GridUnset) until
    /// [`set_grid`](Self::set_grid) is called.
    pub fn new() -> Self {
        Self {
            nbuf: Vec::with_capacity(8),
            ..Self::default()
        }
    }

    /// Create a pathfinder attached to `grid`.
    pub fn for_grid(grid: &'g NavGrid) -> Self {
        let mut pf = Self::new();
        pf.set_grid(grid);
        pf
    }

    /// Attach `grid`, replacing any previous one.
    ///
    /// If the new grid fits within the existing scratch capacity, records
    /// are kept and only the generation is bumped. Otherwise they are
    /// reallocated.
    pub fn set_grid(&mut self, grid: &'g NavGrid) {
        let new_len = grid.len();
        self.grid = Some(grid);
        self.last_path = None;
        self.state = SearchState::Idle;
        self.stats = SearchStats::default();

        if new_len <= self.nodes.len() {
            self.bump_generation();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, SearchNode::default());
        self.generation = 0;
    }

    /// Detach the current grid.
    pub fn clear_grid(&mut self) {
        self.grid = None;
        self.last_path = None;
        self.state = SearchState::Idle;
    }

    /// The attached grid.
    #[inline]
    pub fn grid(&self) -> Option<&'g NavGrid> {
        self.grid
    }

    /// Cap the number of cells a run may expand. `None` removes the cap.
    pub fn set_max_expansions(&mut self, max: Option<usize>) {
        self.max_expansions = max;
    }

    #[inline]
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Counters for the most recent run.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The path found by the most recent run, if it succeeded.
    #[inline]
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    /// The search record the most recent run left for `p`, or `None` if the
    /// run never reached it (or `p` is outside the grid).
    pub fn node(&self, p: Point) -> Option<&SearchNode> {
        let idx = self.grid?.index(p)?;
        let node = self.nodes.get(idx)?;
        (node.generation == self.generation && node.status != NodeStatus::Unseen).then_some(node)
    }

    /// Advance to a fresh generation, invalidating every record at once.
    pub(crate) fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stamps from 2^32 runs ago would look current again.
            for n in self.nodes.iter_mut() {
                *n = SearchNode::default();
            }
            self.generation = 1;
        }
    }

    /// Record for `idx` in the current generation, resetting it on first
    /// touch.
    #[inline]
    pub(crate) fn fresh_node(&mut self, idx: usize) -> &mut SearchNode {
        let cur_gen = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != cur_gen {
            *n = SearchNode {
                generation: cur_gen,
                ..SearchNode::default()
            };
        }
        n
    }

    /// Put `idx` on the open set with its current costs. A cell already open
    /// keeps its original insertion rank.
    pub(crate) fn push_open(&mut self, idx: usize) {
        let seq = self.next_seq;
        let n = self.fresh_node(idx);
        if n.status != NodeStatus::Open {
            n.status = NodeStatus::Open;
            n.seq = seq;
        }
        let entry = NodeRef {
            idx,
            f: n.f_cost(),
            h: n.h_cost,
            seq: n.seq,
        };
        self.next_seq += 1;
        self.open.push(entry);
    }
}
