//! Sutherland-Hodgman clipping in homogeneous clip space.
//!
//! Triangles are clipped against the canonical clip cube before the
//! perspective divide:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! Each clipped point carries a 3-component barycentric weight vector over
//! the original triangle's vertices. Downstream attribute interpolation
//! (color, texcoords, depth) only needs these weights, so the clipper never
//! touches attributes itself.
//!
//! A per-vertex [`ClipCode`] records which planes the vertex violates.
//! [`clip_triangle`] only clips against planes present in the combined code
//! of the three vertices; clipping against a plane no vertex violates is a
//! no-op, so skipping it is purely an optimization.

use glam::{Vec3, Vec4};

/// The 6 planes of the canonical clip-space cube.
///
/// Each plane is an (axis, sign) descriptor: the signed distance is
/// `w + component` for the negative planes and `w - component` for the
/// positive ones. Positive distance means inside the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// Left plane: x >= -w
    Left,
    /// Right plane: x <= w
    Right,
    /// Bottom plane: y >= -w
    Bottom,
    /// Top plane: y <= w
    Top,
    /// Near plane: z >= -w
    Near,
    /// Far plane: z <= w
    Far,
}

impl ClipPlane {
    /// All 6 planes, in clip-code bit order.
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Signed distance from a homogeneous position to this plane.
    /// Positive = inside the clip volume, negative = outside.
    #[inline]
    pub fn signed_distance(self, p: Vec4) -> f32 {
        match self {
            ClipPlane::Left => p.w + p.x,
            ClipPlane::Right => p.w - p.x,
            ClipPlane::Bottom => p.w + p.y,
            ClipPlane::Top => p.w - p.y,
            ClipPlane::Near => p.w + p.z,
            ClipPlane::Far => p.w - p.z,
        }
    }

    /// This plane's bit in a [`ClipCode`].
    #[inline]
    pub fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Bitmask of frustum planes violated by a vertex, one bit per plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipCode(u32);

impl ClipCode {
    pub const INSIDE: ClipCode = ClipCode(0);

    /// Computes the code for a homogeneous position: bit i is set iff the
    /// signed distance to plane i is negative.
    pub fn of(p: Vec4) -> Self {
        let mut code = 0;
        for plane in ClipPlane::ALL {
            if plane.signed_distance(p) < 0.0 {
                code |= plane.bit();
            }
        }
        ClipCode(code)
    }

    /// True when the vertex satisfies all 6 half-space tests.
    #[inline]
    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, plane: ClipPlane) -> bool {
        self.0 & plane.bit() != 0
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for ClipCode {
    type Output = ClipCode;

    #[inline]
    fn bitor(self, rhs: ClipCode) -> ClipCode {
        ClipCode(self.0 | rhs.0)
    }
}

/// A point of a clip polygon: homogeneous position plus barycentric
/// weights over the original triangle's 3 vertices.
#[derive(Clone, Copy, Debug)]
pub struct ClipVertex {
    pub position: Vec4,
    /// Affine weights (w0, w1, w2) with w0 + w1 + w2 = 1.
    pub weights: Vec3,
}

impl ClipVertex {
    #[inline]
    pub fn new(position: Vec4, weights: Vec3) -> Self {
        Self { position, weights }
    }

    /// Linear interpolation of position and weights, used when a polygon
    /// edge crosses a clip plane.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            weights: self.weights.lerp(other.weights, t),
        }
    }
}

/// An ordered convex polygon in clip space.
///
/// Traversal order defines the boundary and is preserved through clipping.
/// Fewer than 3 points means the polygon has been clipped away entirely.
pub struct ClipPolygon {
    pub points: Vec<ClipVertex>,
}

impl ClipPolygon {
    /// The initial polygon for a triangle, with canonical one-hot weights.
    pub fn from_triangle(v0: Vec4, v1: Vec4, v2: Vec4) -> Self {
        Self {
            points: vec![
                ClipVertex::new(v0, Vec3::new(1.0, 0.0, 0.0)),
                ClipVertex::new(v1, Vec3::new(0.0, 1.0, 0.0)),
                ClipVertex::new(v2, Vec3::new(0.0, 0.0, 1.0)),
            ],
        }
    }

    /// True if the polygon no longer encloses any area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Clips this polygon against a single plane, treating the point list
    /// as a closed loop. Inside points are kept unchanged; crossing edges
    /// insert the interpolated intersection point. Output preserves
    /// traversal order and is empty when every point is outside.
    pub fn clip_against_plane(&self, plane: ClipPlane) -> Self {
        if self.points.len() < 3 {
            return Self { points: vec![] };
        }

        let mut output = Vec::with_capacity(self.points.len() + 1);

        for i in 0..self.points.len() {
            let current = &self.points[i];
            let next = &self.points[(i + 1) % self.points.len()];

            let d1 = plane.signed_distance(current.position);
            let d2 = plane.signed_distance(next.position);

            if d1 >= 0.0 {
                output.push(*current);

                if d2 < 0.0 {
                    // Leaving the inside half-space
                    let t = d1 / (d1 - d2);
                    output.push(current.lerp(next, t));
                }
            } else if d2 >= 0.0 {
                // Entering the inside half-space
                let t = d1 / (d1 - d2);
                output.push(current.lerp(next, t));
            }
        }

        Self { points: output }
    }

    /// Fan-triangulates this convex polygon.
    ///
    /// The triangle-setup stage turns each fan triangle into a raster
    /// triangle with fresh edge coefficients; the clipper itself stops at
    /// the polygon.
    pub fn triangulate(&self) -> impl Iterator<Item = (&ClipVertex, &ClipVertex, &ClipVertex)> {
        (1..self.points.len().saturating_sub(1))
            .map(move |i| (&self.points[0], &self.points[i], &self.points[i + 1]))
    }
}

/// Clips a triangle against every frustum plane named in `code`.
///
/// `code` is the union of the three vertices' clip codes, computed by the
/// caller during vertex processing. With `code` empty the input triangle is
/// returned unchanged. The result has 0 points (fully outside) or at least
/// 3.
pub fn clip_triangle(v0: Vec4, v1: Vec4, v2: Vec4, code: ClipCode) -> ClipPolygon {
    let mut polygon = ClipPolygon::from_triangle(v0, v1, v2);

    for plane in ClipPlane::ALL {
        if !code.contains(plane) {
            continue;
        }
        if polygon.is_degenerate() {
            polygon.points.clear();
            break;
        }
        polygon = polygon.clip_against_plane(plane);
    }

    polygon
}
