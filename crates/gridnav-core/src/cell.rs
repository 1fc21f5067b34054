//! The [`Cell`] type: one addressable position of a [`NavGrid`](crate::NavGrid).

use crate::geom::{Point, WorldPos};

/// A lattice cell: its grid coordinate, its world-space center, and the
/// walkability flag last computed for it.
///
/// Cells are created by the grid and never move. Search bookkeeping (costs,
/// parent links) is kept outside the cell by the pathfinder.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    center: WorldPos,
    walkable: bool,
}

impl Cell {
    #[inline]
    pub(crate) const fn new(pos: Point, center: WorldPos) -> Self {
        Self {
            pos,
            center,
            walkable: true,
        }
    }

    /// Grid coordinate `(ix, iy)`.
    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// X index on the grid.
    #[inline]
    pub const fn ix(&self) -> i32 {
        self.pos.x
    }

    /// Y index on the grid.
    #[inline]
    pub const fn iy(&self) -> i32 {
        self.pos.y
    }

    /// World-space center of the cell.
    #[inline]
    pub const fn center(&self) -> WorldPos {
        self.center
    }

    /// The stored walkability flag.
    #[inline]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    #[inline]
    pub(crate) fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }
}
