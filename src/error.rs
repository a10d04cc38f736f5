//! Error types for tile-grid configuration.

use std::fmt;

/// Errors that can occur when constructing a [`crate::raster::TileGrid`].
///
/// Steady-state rasterization never fails: degenerate geometry (empty
/// bounding boxes, fully clipped triangles) is a normal outcome signaled
/// by empty results. Only grid configuration is validated up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Screen resolution has a zero dimension.
    EmptyScreen { width: u32, height: u32 },

    /// Tile size must be a non-zero power of two so tile indices can be
    /// derived from fixed-point coordinates with a single shift.
    InvalidTileSize(u32),

    /// At least one bin (worker partition) is required per tile.
    NoBins,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyScreen { width, height } => {
                write!(f, "screen resolution {}x{} has a zero dimension", width, height)
            }
            GridError::InvalidTileSize(size) => {
                write!(f, "tile size {} is not a non-zero power of two", size)
            }
            GridError::NoBins => write!(f, "bin count must be at least 1"),
        }
    }
}

impl std::error::Error for GridError {}
