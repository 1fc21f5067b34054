//! A* pathfinding with octile movement over a [`gridnav_core::NavGrid`].
//!
//! - **Octile distance** in integer units ([`octile`]): straight steps cost
//!   10, diagonal steps 14. It is both the step cost and the A* estimate.
//! - **A\*** search ([`Pathfinder::find_path`],
//!   [`Pathfinder::find_path_from_positions`]) returning a [`Path`] or a
//!   [`PathError`].
//!
//! A [`Pathfinder`] borrows its grid and owns every per-run structure (cost
//! records, open heap, neighbor buffer), so repeated queries incur no
//! allocations after warm-up and the grid is never written while searching.
//!
//! ```
//! use gridnav_core::{AllWalkable, Point, WorldPos, build_grid};
//! use gridnav_paths::Pathfinder;
//!
//! let grid = build_grid(5, 5, 1.0, WorldPos::ZERO).unwrap();
//! let mut pf = Pathfinder::for_grid(&grid);
//! let path = pf.find_path(Point::new(0, 0), Point::new(4, 4), &AllWalkable).unwrap();
//! assert_eq!(path.cost(), 56);
//! ```

mod astar;
mod distance;
mod error;
mod path;
mod pathfinder;

pub use distance::{DIAGONAL_COST, ORTHOGONAL_COST, octile};
pub use error::PathError;
pub use path::Path;
pub use pathfinder::{Pathfinder, SearchNode, SearchState, SearchStats};
