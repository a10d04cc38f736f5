//! Geometry-to-pixel core of a CPU triangle rasterizer.
//!
//! The crate covers three stages of a tile-based software rasterizer:
//!
//! 1. [`clipper`] - Sutherland-Hodgman clipping of triangles against the
//!    view frustum in homogeneous clip space, carrying barycentric
//!    attribute weights.
//! 2. Binning ([`raster::binner`]) - assignment of raster triangles to the
//!    screen tiles they overlap, with Larrabee-style trivial accept /
//!    trivial reject classification per tile.
//! 3. Tile rasterization ([`raster::rasterizer`]) - per-pixel coverage via
//!    vectorized 2x2-block edge-function evaluation, handed to an external
//!    shading stage through the [`raster::CoverageSink`] seam.
//!
//! Vertex shading, pixel shading, depth testing and presentation are
//! external collaborators.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastile::prelude::*;
//!
//! let mut grid = TileGrid::new(800, 600, 64, 1)?;
//! assign_triangles(0, &triangles, &mut grid);
//! let coverage = rasterize_frame(&triangles, &grid);
//! ```

// Public API - exposed to library consumers
pub mod clipper;
pub mod error;
pub mod fixed;
pub mod pipeline;
pub mod raster;

// Re-export commonly needed types at crate root for convenience
pub use error::GridError;
pub use fixed::{Fixed, FixedPt};
pub use raster::{RasterTriangle, TileGrid};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastile::prelude::*;
/// ```
pub mod prelude {
    // Clipping
    pub use crate::clipper::{clip_triangle, ClipCode, ClipPlane, ClipPolygon, ClipVertex};

    // Fixed-point screen coordinates
    pub use crate::fixed::{Fixed, FixedPt};

    // Binning & rasterization
    pub use crate::raster::{
        assign_triangles, rasterize_tile, CoverageSink, PixelList, RasterTriangle, Tile,
        TileAssignment, TileGrid,
    };

    // Frame driver
    pub use crate::pipeline::rasterize_frame;

    // Errors
    pub use crate::error::GridError;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::raster::kernel::{coverage_mask, coverage_mask_scalar, EdgeQuad};
}
