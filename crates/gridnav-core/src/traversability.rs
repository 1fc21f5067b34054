//! Walkability classification.

use crate::cell::Cell;

/// Decides whether a cell can be entered.
///
/// Implementations may consult anything (a physics world, a tile map, a
/// closure over test data). Callers treat the answer as fresh on every call
/// and do not cache it.
pub trait Traversability {
    fn is_walkable(&self, cell: &Cell) -> bool;
}

impl<F> Traversability for F
where
    F: Fn(&Cell) -> bool,
{
    #[inline]
    fn is_walkable(&self, cell: &Cell) -> bool {
        self(cell)
    }
}

/// Reads the flag stored on each cell, as last set by
/// [`NavGrid::refresh_walkability`](crate::NavGrid::refresh_walkability) or
/// [`NavGrid::set_walkable`](crate::NavGrid::set_walkable).
#[derive(Copy, Clone, Debug, Default)]
pub struct StoredWalkability;

impl Traversability for StoredWalkability {
    #[inline]
    fn is_walkable(&self, cell: &Cell) -> bool {
        cell.is_walkable()
    }
}

/// Every cell is walkable.
#[derive(Copy, Clone, Debug, Default)]
pub struct AllWalkable;

impl Traversability for AllWalkable {
    #[inline]
    fn is_walkable(&self, _cell: &Cell) -> bool {
        true
    }
}
