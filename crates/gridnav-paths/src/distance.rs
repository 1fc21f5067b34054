use gridnav_core::Point;

/// Cost of one horizontal or vertical step.
pub const ORTHOGONAL_COST: i32 = 10;
/// Cost of one diagonal step (10·√2, rounded).
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance between two cells in integer cost units.
///
/// Moves diagonally `min(dx, dy)` times and straight for the rest. Used both
/// as the cost of a single step between neighbors and as the A* estimate.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let lo = dx.min(dy);
    let hi = dx.max(dy);
    lo * DIAGONAL_COST + (hi - lo) * ORTHOGONAL_COST
}
