//! The [`NavGrid`] type: a dense lattice of [`Cell`]s laid over world space.
//!
//! Cells are stored row-major (`index = iy * size_x + ix`). Cell `(0, 0)` is
//! the bottom-left cell; the grid's `origin` is its world-space center.

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::{Point, Range, WorldPos};
use crate::traversability::Traversability;

/// Neighbor offsets in enumeration order: `dy` outer, `dx` inner, both
/// running -1..=1. Pathfinding tie-breaks depend on this order.
const NEIGHBOR_OFFSETS: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Construction parameters for a [`NavGrid`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of cells along X.
    pub size_x: i32,
    /// Number of cells along Y.
    pub size_y: i32,
    /// Half the side length of a cell.
    pub radius: f64,
    /// World-space center of the grid.
    pub origin: WorldPos,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size_x: 10,
            size_y: 10,
            radius: 25.0,
            origin: WorldPos::ZERO,
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<(), GridError> {
        if self.size_x <= 0 || self.size_y <= 0 {
            return Err(GridError::InvalidSize {
                size_x: self.size_x,
                size_y: self.size_y,
            });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GridError::InvalidRadius(self.radius));
        }
        if !self.origin.is_finite() {
            return Err(GridError::InvalidOrigin(self.origin));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NavGrid
// ---------------------------------------------------------------------------

/// A fixed-shape grid of [`Cell`]s with world-space geometry.
///
/// The shape never changes after [`build`](NavGrid::build); only the
/// per-cell walkability flags can be rewritten.
#[derive(Clone, Debug)]
pub struct NavGrid {
    config: GridConfig,
    cells: Vec<Cell>,
}

/// Build a grid of `size_x * size_y` cells of the given `radius`, centered on
/// `origin`. Every cell starts out walkable.
pub fn build_grid(
    size_x: i32,
    size_y: i32,
    radius: f64,
    origin: WorldPos,
) -> Result<NavGrid, GridError> {
    NavGrid::build(GridConfig {
        size_x,
        size_y,
        radius,
        origin,
    })
}

impl NavGrid {
    /// Build a grid from `config`. Every cell starts out walkable.
    pub fn build(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;

        let d = config.radius * 2.0;
        let bottom_left = Self::corner(&config, -0.5);
        let mut cells = Vec::with_capacity((config.size_x * config.size_y) as usize);
        for y in 0..config.size_y {
            for x in 0..config.size_x {
                let center = WorldPos::new(
                    bottom_left.x + x as f64 * d + config.radius,
                    bottom_left.y + y as f64 * d + config.radius,
                    config.origin.z,
                );
                cells.push(Cell::new(Point::new(x, y), center));
            }
        }
        log::debug!(
            "built {}x{} grid ({} cells, radius {})",
            config.size_x,
            config.size_y,
            cells.len(),
            config.radius
        );
        Ok(Self { config, cells })
    }

    /// Build a grid and classify every cell with `eval`.
    pub fn build_with(config: GridConfig, eval: &impl Traversability) -> Result<Self, GridError> {
        let mut grid = Self::build(config)?;
        grid.refresh_walkability(eval);
        Ok(grid)
    }

    /// Corner of the grid rectangle: `sign = -0.5` for bottom-left,
    /// `+0.5` for top-right.
    fn corner(config: &GridConfig, sign: f64) -> WorldPos {
        let d = config.radius * 2.0;
        WorldPos::new(
            config.origin.x + sign * config.size_x as f64 * d,
            config.origin.y + sign * config.size_y as f64 * d,
            config.origin.z,
        )
    }

    // -----------------------------------------------------------------------
    // Shape
    // -----------------------------------------------------------------------

    /// The configuration this grid was built from.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn size_x(&self) -> i32 {
        self.config.size_x
    }

    #[inline]
    pub fn size_y(&self) -> i32 {
        self.config.size_y
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Side length of a cell.
    #[inline]
    pub fn diameter(&self) -> f64 {
        self.config.radius * 2.0
    }

    /// World-space center of the grid.
    #[inline]
    pub fn origin(&self) -> WorldPos {
        self.config.origin
    }

    /// The valid cell coordinates, `[0, size_x) × [0, size_y)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.config.size_x, self.config.size_y)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a built grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total size of the grid in world units, `(width, height)`.
    pub fn world_extent(&self) -> (f64, f64) {
        let d = self.diameter();
        (
            self.config.size_x as f64 * d,
            self.config.size_y as f64 * d,
        )
    }

    /// Lower-left corner of the grid rectangle.
    pub fn bottom_left(&self) -> WorldPos {
        Self::corner(&self.config, -0.5)
    }

    /// Upper-right corner of the grid rectangle.
    pub fn top_right(&self) -> WorldPos {
        Self::corner(&self.config, 0.5)
    }

    // -----------------------------------------------------------------------
    // Indexing
    // -----------------------------------------------------------------------

    /// Convert a cell coordinate to a linear index. Returns `None` if out of
    /// bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(p.y as usize * self.config.size_x as usize + p.x as usize)
    }

    /// Convert a linear index back to a cell coordinate.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.config.size_x as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// World-space center of the cell at `p`.
    pub fn cell_center(&self, p: Point) -> Option<WorldPos> {
        self.cell(p).map(Cell::center)
    }

    /// Resolve a world position to the cell covering it.
    ///
    /// The position is normalized to `[0, 1]` along each axis of the grid
    /// rectangle (bounds inclusive), scaled by `size - 1` and rounded to the
    /// nearest index. Returns `None` outside the rectangle.
    pub fn cell_from_world_position(&self, pos: WorldPos) -> Option<&Cell> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return None;
        }
        let lo = self.bottom_left();
        let hi = self.top_right();
        if pos.x < lo.x || pos.x > hi.x || pos.y < lo.y || pos.y > hi.y {
            return None;
        }
        let ix = axis_index(pos.x, lo.x, hi.x, self.config.size_x);
        let iy = axis_index(pos.y, lo.y, hi.y, self.config.size_y);
        self.cell(Point::new(ix, iy))
    }

    // -----------------------------------------------------------------------
    // Neighbors
    // -----------------------------------------------------------------------

    /// The in-bounds cells surrounding `p`, in fixed order (row below first,
    /// left to right).
    pub fn neighbors_of(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors_into(p, &mut buf);
        buf
    }

    /// Append the neighbors of `p` into `buf`, in the same order as
    /// [`neighbors_of`](Self::neighbors_of). The caller clears `buf`.
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) {
        let bounds = self.bounds();
        for d in NEIGHBOR_OFFSETS {
            let n = p + d;
            if bounds.contains(n) {
                buf.push(n);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Walkability
    // -----------------------------------------------------------------------

    /// Reclassify every cell with `eval`. Returns the number of walkable
    /// cells.
    pub fn refresh_walkability(&mut self, eval: &impl Traversability) -> usize {
        let mut walkable = 0;
        for cell in self.cells.iter_mut() {
            let w = eval.is_walkable(cell);
            cell.set_walkable(w);
            walkable += usize::from(w);
        }
        log::debug!("walkability refreshed: {}/{} walkable", walkable, self.cells.len());
        walkable
    }

    /// Overwrite the stored flag of one cell. Returns `false` if `p` is out
    /// of bounds.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i].set_walkable(walkable);
                true
            }
            None => false,
        }
    }

    /// Number of cells whose stored flag is set.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_walkable()).count()
    }
}

/// Fractional-rounding index along one axis. A single-cell axis is always 0.
#[inline]
fn axis_index(v: f64, lo: f64, hi: f64, size: i32) -> i32 {
    if size <= 1 {
        return 0;
    }
    let frac = (v - lo) / (hi - lo);
    (frac * (size - 1) as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> NavGrid {
        build_grid(5, 5, 1.0, WorldPos::ZERO).unwrap()
    }

    #[test]
    fn build_rejects_bad_config() {
        assert_eq!(
            build_grid(0, 5, 1.0, WorldPos::ZERO).unwrap_err(),
            GridError::InvalidSize { size_x: 0, size_y: 5 }
        );
        assert!(matches!(
            build_grid(3, -1, 1.0, WorldPos::ZERO),
            Err(GridError::InvalidSize { .. })
        ));
        assert_eq!(
            build_grid(3, 3, 0.0, WorldPos::ZERO).unwrap_err(),
            GridError::InvalidRadius(0.0)
        );
        assert!(matches!(
            build_grid(3, 3, f64::NAN, WorldPos::ZERO),
            Err(GridError::InvalidRadius(_))
        ));
        assert!(matches!(
            build_grid(3, 3, 1.0, WorldPos::new(f64::INFINITY, 0.0, 0.0)),
            Err(GridError::InvalidOrigin(_))
        ));
    }

    #[test]
    fn build_lays_out_row_major() {
        let g = build_grid(4, 3, 1.0, WorldPos::ZERO).unwrap();
        assert_eq!(g.len(), 12);
        for (i, cell) in g.cells().iter().enumerate() {
            assert_eq!(g.index(cell.pos()), Some(i));
            assert_eq!(g.point(i), cell.pos());
            assert!(cell.is_walkable());
        }
        assert_eq!(g.cells()[5].pos(), Point::new(1, 1));
    }

    #[test]
    fn cell_centers_from_bottom_left() {
        let g = grid5();
        assert_eq!(g.world_extent(), (10.0, 10.0));
        assert_eq!(g.bottom_left(), WorldPos::new(-5.0, -5.0, 0.0));
        assert_eq!(g.top_right(), WorldPos::new(5.0, 5.0, 0.0));
        assert_eq!(g.cell_center(Point::new(0, 0)), Some(WorldPos::new(-4.0, -4.0, 0.0)));
        assert_eq!(g.cell_center(Point::new(2, 2)), Some(WorldPos::new(0.0, 0.0, 0.0)));
        assert_eq!(g.cell_center(Point::new(4, 1)), Some(WorldPos::new(4.0, -2.0, 0.0)));
        assert_eq!(g.cell_center(Point::new(5, 0)), None);
    }

    #[test]
    fn center_round_trip() {
        let configs = [
            GridConfig::default(),
            GridConfig {
                size_x: 7,
                size_y: 3,
                radius: 0.5,
                origin: WorldPos::new(100.0, -40.0, 12.0),
            },
            GridConfig {
                size_x: 64,
                size_y: 1,
                radius: 3.0,
                origin: WorldPos::new(-1.5, 2.5, 0.0),
            },
        ];
        for config in configs {
            let g = NavGrid::build(config).unwrap();
            for p in g.bounds() {
                let center = g.cell_center(p).unwrap();
                let cell = g.cell_from_world_position(center).unwrap();
                assert_eq!(cell.pos(), p, "config {:?}", config);
            }
        }
    }

    #[test]
    fn world_position_bounds_are_inclusive() {
        let g = grid5();
        assert_eq!(
            g.cell_from_world_position(WorldPos::new(-5.0, -5.0, 0.0)).map(Cell::pos),
            Some(Point::new(0, 0))
        );
        assert_eq!(
            g.cell_from_world_position(WorldPos::new(5.0, 5.0, 0.0)).map(Cell::pos),
            Some(Point::new(4, 4))
        );
        assert!(g.cell_from_world_position(WorldPos::new(5.01, 0.0, 0.0)).is_none());
        assert!(g.cell_from_world_position(WorldPos::new(0.0, -5.01, 0.0)).is_none());
        assert!(g.cell_from_world_position(WorldPos::new(f64::NAN, 0.0, 0.0)).is_none());
    }

    #[test]
    fn world_position_rounds_fraction() {
        let g = grid5();
        // frac 0.5 on a 5-wide axis -> 0.5 * 4 = 2.
        assert_eq!(
            g.cell_from_world_position(WorldPos::new(0.0, 0.0, 7.0)).map(Cell::pos),
            Some(Point::new(2, 2))
        );
        // frac 0.3 -> 1.2 -> 1 ; frac 0.9 -> 3.6 -> 4.
        assert_eq!(
            g.cell_from_world_position(WorldPos::new(-2.0, 4.0, 0.0)).map(Cell::pos),
            Some(Point::new(1, 4))
        );
    }

    #[test]
    fn single_cell_axis_resolves_to_zero() {
        let g = build_grid(1, 1, 2.0, WorldPos::ZERO).unwrap();
        for pos in [
            WorldPos::new(-2.0, -2.0, 0.0),
            WorldPos::new(0.0, 0.0, 0.0),
            WorldPos::new(2.0, 1.9, 0.0),
        ] {
            assert_eq!(g.cell_from_world_position(pos).map(Cell::pos), Some(Point::ZERO));
        }
        assert!(g.neighbors_of(Point::ZERO).is_empty());
    }

    #[test]
    fn neighbor_counts_and_adjacency() {
        let g = grid5();
        for p in g.bounds() {
            let ns = g.neighbors_of(p);
            let edge_x = p.x == 0 || p.x == 4;
            let edge_y = p.y == 0 || p.y == 4;
            let expected = match (edge_x, edge_y) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(ns.len(), expected, "neighbors of {p}");
            for n in ns {
                assert!(p.is_adjacent(n));
                assert!(g.bounds().contains(n));
            }
        }
    }

    #[test]
    fn neighbor_order_is_dy_then_dx() {
        let g = grid5();
        assert_eq!(
            g.neighbors_of(Point::new(1, 1)),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ]
        );
        assert_eq!(
            g.neighbors_of(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
    }

    #[test]
    fn refresh_and_set_walkability() {
        let mut g = grid5();
        let walkable = g.refresh_walkability(&|c: &Cell| c.iy() != 2);
        assert_eq!(walkable, 20);
        assert_eq!(g.walkable_count(), 20);
        assert!(!g.cell(Point::new(3, 2)).unwrap().is_walkable());

        assert!(g.set_walkable(Point::new(3, 2), true));
        assert!(!g.set_walkable(Point::new(9, 9), true));
        assert_eq!(g.walkable_count(), 21);
    }

    #[test]
    fn build_with_classifies_cells() {
        let config = GridConfig {
            size_x: 3,
            size_y: 3,
            radius: 1.0,
            origin: WorldPos::ZERO,
        };
        let g = NavGrid::build_with(config, &|c: &Cell| c.center().x < 0.0).unwrap();
        assert_eq!(g.walkable_count(), 3);
    }
}
