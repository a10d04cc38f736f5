//! Screen-space raster triangles and tile-based rasterization.
//!
//! A [`RasterTriangle`] is a post-clip triangle in fixed-point screen
//! space with precomputed edge functions and tile-corner indices. The
//! binner ([`binner`]) assigns triangle ids to the tiles they overlap;
//! the rasterizer ([`rasterizer`]) turns one tile's assignments into
//! per-pixel coverage.

pub mod binner;
pub mod kernel;
pub mod rasterizer;
pub mod tile;

pub use binner::assign_triangles;
pub use rasterizer::{rasterize_tile, CoverageSink, CoveredPixel, PixelList};
pub use tile::{Tile, TileAssignment, TileGrid};

use glam::Vec3;

use crate::fixed::{Fixed, FixedPt};

/// An affine edge function over raw fixed-point screen coordinates:
///
/// ```text
/// E(p) = a * p.x + b * p.y + c
/// ```
///
/// Derived from a directed edge (vi -> vj) so that `E` is positive on the
/// interior side for a counter-clockwise triangle, zero on the edge, and
/// negative outside. Coefficients are widened to `i64`; with 4 fractional
/// bits the products stay far below overflow at any realistic resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeFn {
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl EdgeFn {
    /// Builds the edge function for the directed edge (vi -> vj).
    pub fn from_points(vi: FixedPt, vj: FixedPt) -> Self {
        let dx = (vj.x.raw() - vi.x.raw()) as i64;
        let dy = (vj.y.raw() - vi.y.raw()) as i64;

        // E(p) = cross(vj - vi, p - vi), expanded to a*x + b*y + c
        let a = -dy;
        let b = dx;
        let c = -(a * vi.x.raw() as i64 + b * vi.y.raw() as i64);
        Self { a, b, c }
    }

    /// Evaluates the edge function at a fixed-point position.
    #[inline]
    pub fn eval(&self, x: Fixed, y: Fixed) -> i64 {
        self.a * x.raw() as i64 + self.b * y.raw() as i64 + self.c
    }

    /// Index in {0,1,2,3} of the tile corner where this edge function is
    /// largest, encoded as `x = i % 2`, `y = i / 2`. If the edge is
    /// negative there, it is negative over the whole tile (trivial
    /// reject).
    #[inline]
    pub fn reject_corner(&self) -> u8 {
        (self.a > 0) as u8 + 2 * (self.b > 0) as u8
    }

    /// The diagonally opposite corner, where the edge function is
    /// smallest. If the edge is non-negative there, the whole tile is
    /// inside this edge's half-plane (trivial accept).
    #[inline]
    pub fn accept_corner(&self) -> u8 {
        3 - self.reject_corner()
    }
}

/// A triangle ready for binning and rasterization.
///
/// Owned exclusively by the frame's shared triangle buffer; tiles refer to
/// it by `id` and never copy it. All three edge functions share one sign
/// convention fixed at setup: positive inside.
#[derive(Clone, Copy, Debug)]
pub struct RasterTriangle {
    /// Stable index into the shared triangle buffer.
    pub id: u32,
    pub v0: FixedPt,
    pub v1: FixedPt,
    pub v2: FixedPt,
    /// Edge functions for (v0->v1), (v1->v2), (v2->v0).
    pub edges: [EdgeFn; 3],
    /// Per-edge trivial-reject tile corner index.
    pub reject_corner: [u8; 3],
    /// Per-edge trivial-accept tile corner index.
    pub accept_corner: [u8; 3],
}

impl RasterTriangle {
    /// Triangle setup: winding normalization, edge functions, and
    /// accept/reject corner classification.
    ///
    /// Returns `None` for zero-area input; a degenerate triangle covers no
    /// pixels and is a normal outcome, not an error. Clockwise input is
    /// rewound so the positive-inside convention always holds.
    pub fn setup(id: u32, p0: FixedPt, p1: FixedPt, p2: FixedPt) -> Option<Self> {
        let area2 = EdgeFn::from_points(p0, p1).eval(p2.x, p2.y);
        if area2 == 0 {
            return None;
        }

        let (v0, v1, v2) = if area2 > 0 { (p0, p1, p2) } else { (p0, p2, p1) };

        let edges = [
            EdgeFn::from_points(v0, v1),
            EdgeFn::from_points(v1, v2),
            EdgeFn::from_points(v2, v0),
        ];

        Some(Self {
            id,
            v0,
            v1,
            v2,
            edges,
            reject_corner: [
                edges[0].reject_corner(),
                edges[1].reject_corner(),
                edges[2].reject_corner(),
            ],
            accept_corner: [
                edges[0].accept_corner(),
                edges[1].accept_corner(),
                edges[2].accept_corner(),
            ],
        })
    }

    /// Setup from floating-point pixel positions.
    pub fn setup_from_f32(id: u32, p0: (f32, f32), p1: (f32, f32), p2: (f32, f32)) -> Option<Self> {
        Self::setup(
            id,
            FixedPt::from_f32(p0.0, p0.1),
            FixedPt::from_f32(p1.0, p1.1),
            FixedPt::from_f32(p2.0, p2.1),
        )
    }

    /// Fixed-point bounding box as (min_x, min_y, max_x, max_y).
    #[inline]
    pub fn bounds(&self) -> (Fixed, Fixed, Fixed, Fixed) {
        (
            self.v0.x.min(self.v1.x).min(self.v2.x),
            self.v0.y.min(self.v1.y).min(self.v2.y),
            self.v0.x.max(self.v1.x).max(self.v2.x),
            self.v0.y.max(self.v1.y).max(self.v2.y),
        )
    }

    /// Twice the triangle's signed area in raw fixed-point units.
    /// Positive after setup.
    #[inline]
    pub fn area2(&self) -> i64 {
        self.edges[0].eval(self.v2.x, self.v2.y)
    }

    /// Converts the three edge values at a sample point into barycentric
    /// weights over (v0, v1, v2). The values must come from this
    /// triangle's edges in order.
    #[inline]
    pub fn barycentric(&self, e: [i64; 3]) -> Vec3 {
        // e[1] is the edge opposite v0, e[2] opposite v1, e[0] opposite v2
        let sum = (e[0] + e[1] + e[2]) as f32;
        Vec3::new(e[1] as f32 / sum, e[2] as f32 / sum, e[0] as f32 / sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> RasterTriangle {
        // CCW in a y-down raster: (0,0) -> (10,0) -> (0,10)
        RasterTriangle::setup_from_f32(0, (0.0, 0.0), (10.0, 0.0), (0.0, 10.0)).unwrap()
    }

    #[test]
    fn edge_functions_positive_inside_negative_outside() {
        let t = triangle();
        let inside = FixedPt::from_f32(2.0, 2.0);
        for e in &t.edges {
            assert!(e.eval(inside.x, inside.y) > 0);
        }

        // Outside the hypotenuse: at least one edge strictly negative
        let outside = FixedPt::from_f32(9.0, 9.0);
        assert!(t.edges.iter().any(|e| e.eval(outside.x, outside.y) < 0));
    }

    #[test]
    fn edge_function_zero_on_the_edge() {
        let t = triangle();
        // Midpoint of (v0, v1) lies on edge 0
        let on_edge = FixedPt::from_f32(5.0, 0.0);
        assert_eq!(t.edges[0].eval(on_edge.x, on_edge.y), 0);
    }

    #[test]
    fn setup_rejects_zero_area() {
        assert!(RasterTriangle::setup_from_f32(0, (1.0, 1.0), (5.0, 5.0), (9.0, 9.0)).is_none());
        assert!(RasterTriangle::setup_from_f32(0, (3.0, 3.0), (3.0, 3.0), (3.0, 3.0)).is_none());
    }

    #[test]
    fn setup_normalizes_winding() {
        // Same triangle, opposite traversal order
        let cw = RasterTriangle::setup_from_f32(0, (0.0, 0.0), (0.0, 10.0), (10.0, 0.0)).unwrap();
        let inside = FixedPt::from_f32(2.0, 2.0);
        for e in &cw.edges {
            assert!(e.eval(inside.x, inside.y) > 0);
        }
        assert!(cw.area2() > 0);
    }

    #[test]
    fn reject_and_accept_corners_are_opposite() {
        let t = triangle();
        for i in 0..3 {
            assert_eq!(t.reject_corner[i] + t.accept_corner[i], 3);
            assert!(t.reject_corner[i] < 4);
        }
    }

    #[test]
    fn reject_corner_maximizes_the_edge_function() {
        let t = triangle();
        for e in &t.edges {
            let corner = e.reject_corner();
            let at = |idx: u8| {
                let x = Fixed::from_pixel((idx % 2) as i32 * 8);
                let y = Fixed::from_pixel((idx / 2) as i32 * 8);
                e.eval(x, y)
            };
            let best = at(corner);
            for idx in 0..4 {
                assert!(at(idx) <= best);
            }
        }
    }

    #[test]
    fn barycentric_weights_sum_to_one() {
        let t = triangle();
        let p = FixedPt::from_f32(2.0, 3.0);
        let e = [
            t.edges[0].eval(p.x, p.y),
            t.edges[1].eval(p.x, p.y),
            t.edges[2].eval(p.x, p.y),
        ];
        let w = t.barycentric(e);
        assert_relative_eq!(w.x + w.y + w.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn barycentric_is_one_hot_at_vertices() {
        let t = triangle();
        let e = [
            t.edges[0].eval(t.v0.x, t.v0.y),
            t.edges[1].eval(t.v0.x, t.v0.y),
            t.edges[2].eval(t.v0.x, t.v0.y),
        ];
        let w = t.barycentric(e);
        assert_relative_eq!(w.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(w.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(w.z, 0.0, epsilon = 1e-6);
    }
}
