use gridnav_core::{Point, WorldPos};
use thiserror::Error;

/// Why a path query produced no path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("no grid attached to the pathfinder")]
    GridUnset,
    #[error("cell {0} is outside the grid")]
    InvalidCell(Point),
    #[error("world position {pos} does not map to a grid cell")]
    Unresolved { pos: WorldPos },
    #[error("no path exists")]
    NotFound,
    #[error("search budget exhausted after {expansions} expansions")]
    BudgetExhausted { expansions: usize },
    #[error("parent chain broken at cell {at}")]
    BrokenParentChain { at: Point },
}

impl PathError {
    /// Whether this is an ordinary outcome the caller can react to (pick
    /// other endpoints, raise the budget) rather than a misconfiguration or
    /// an internal bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PathError::NotFound | PathError::BudgetExhausted { .. } | PathError::Unresolved { .. }
        )
    }
}
