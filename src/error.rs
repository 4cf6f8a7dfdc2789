//! Error types for grid construction and cell access

use std::fmt;

use glam::IVec2;

/// Errors that can occur while building or querying a [`VoronoiGrid`](crate::VoronoiGrid)
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Cell coordinates lie outside a non-wrapping grid
    CellOutOfRange { x: i32, y: i32 },
    /// An explicitly supplied site position lies outside its cell's pixel bounds
    PositionOutsideCell { cell: IVec2, position: IVec2 },
    /// Requested site ID does not exist
    SiteNotFound(usize),
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            VoronoiError::CellOutOfRange { x, y } => {
                write!(f, "cell ({}, {}) is outside the grid", x, y)
            }
            VoronoiError::PositionOutsideCell { cell, position } => write!(
                f,
                "position ({}, {}) is outside cell ({}, {})",
                position.x, position.y, cell.x, cell.y
            ),
            VoronoiError::SiteNotFound(id) => write!(f, "site not found: {}", id),
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
