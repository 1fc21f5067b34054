//! **gridnav-core**: grid geometry and cell model for octile pathfinding.
//!
//! This crate provides the types every other *gridnav* crate builds on:
//! integer cell coordinates, world-space positions, the [`NavGrid`] lattice
//! with world-position lookup and neighbor enumeration, and the
//! [`Traversability`] capability used to classify cells.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod traversability;

pub use cell::Cell;
pub use error::GridError;
pub use geom::{Point, Range, WorldPos};
pub use grid::{GridConfig, NavGrid, build_grid};
pub use traversability::{AllWalkable, StoredWalkability, Traversability};
