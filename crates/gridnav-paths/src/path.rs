use gridnav_core::{NavGrid, Point, WorldPos};

/// A route returned by a successful search: the cells from start to target
/// (both inclusive) and the accumulated octile cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: i32) -> Self {
        Self { cells, cost }
    }

    /// The cells in travel order.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Total cost, equal to the sum of the step costs between consecutive
    /// cells.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a path holds at least its start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn target(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    /// Whether `p` lies on the path.
    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }

    /// The world-space centers of the path's cells on `grid`. Cells outside
    /// `grid` are skipped.
    pub fn world_points(&self, grid: &NavGrid) -> Vec<WorldPos> {
        self.cells.iter().filter_map(|&p| grid.cell_center(p)).collect()
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
