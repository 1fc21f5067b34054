use thiserror::Error;

/// Rejected grid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {size_x}x{size_y}")]
    InvalidSize { size_x: i32, size_y: i32 },
    #[error("cell radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
    #[error("grid anchor must be finite, got {0}")]
    InvalidOrigin(crate::WorldPos),
}
