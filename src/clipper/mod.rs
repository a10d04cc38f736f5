//! Triangle clipping against the view frustum.
//!
//! Clipping happens in homogeneous clip space, after the vertex transform
//! and before the perspective divide. The clip volume is the canonical cube
//! `-w <= x, y, z <= w`, so the planes are fixed and never need rebuilding
//! when projection parameters change.

pub mod homogeneous;

// Re-export the public clipping surface
pub use homogeneous::{clip_triangle, ClipCode, ClipPlane, ClipPolygon, ClipVertex};
