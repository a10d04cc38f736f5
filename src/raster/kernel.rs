//! Lane-parallel edge evaluation over 2x2 pixel blocks.
//!
//! The rasterizer works in 2x2 blocks: one [`EdgeQuad`] holds a single
//! edge function's value at the four pixel centers of a block, and a
//! block's coverage mask combines the three edges' quads. Edge functions
//! are affine, so moving the block steps every lane by the same constant
//! instead of re-evaluating.
//!
//! The coverage test has a scalar reference implementation and an AVX2
//! path selected at runtime. Lane count and block shape are constants of
//! this kernel, not of the triangle or tile data model.

use crate::fixed::{Fixed, FRAC_BITS};
use crate::raster::EdgeFn;

/// Pixels per block.
pub const LANES: usize = 4;

/// Pixel offsets of the block's lanes relative to its base pixel.
pub const LANE_OFFSETS: [(i32, i32); LANES] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// One edge function's values at the four pixel centers of a 2x2 block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeQuad {
    pub v: [i64; LANES],
}

impl EdgeQuad {
    /// Evaluates `edge` at the pixel centers of the block based at
    /// `(px, py)`.
    pub fn eval(edge: &EdgeFn, px: i32, py: i32) -> Self {
        let mut v = [0i64; LANES];
        for (lane, (ox, oy)) in LANE_OFFSETS.iter().enumerate() {
            v[lane] = edge.eval(
                Fixed::center_of_pixel(px + ox),
                Fixed::center_of_pixel(py + oy),
            );
        }
        Self { v }
    }

    /// Per-lane increment for moving the block 2 pixels along x.
    #[inline]
    pub fn x_step(edge: &EdgeFn) -> i64 {
        edge.a << (FRAC_BITS + 1)
    }

    /// Per-lane increment for moving the block 2 pixels along y.
    #[inline]
    pub fn y_step(edge: &EdgeFn) -> i64 {
        edge.b << (FRAC_BITS + 1)
    }

    /// Adds the same increment to every lane.
    #[inline]
    pub fn step(&mut self, d: i64) {
        for lane in &mut self.v {
            *lane += d;
        }
    }
}

/// Coverage mask for one block: bit `i` is set iff lane `i`'s pixel is
/// inside all three edges (every value non-negative).
#[inline]
pub fn coverage_mask(e0: &EdgeQuad, e1: &EdgeQuad, e2: &EdgeQuad) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { coverage_mask_avx2(e0, e1, e2) };
        }
    }

    coverage_mask_scalar(e0, e1, e2)
}

/// Scalar reference implementation. A lane is covered iff the bitwise or
/// of its three values has a clear sign bit.
#[inline]
pub fn coverage_mask_scalar(e0: &EdgeQuad, e1: &EdgeQuad, e2: &EdgeQuad) -> u8 {
    let mut mask = 0u8;
    for lane in 0..LANES {
        if (e0.v[lane] | e1.v[lane] | e2.v[lane]) >= 0 {
            mask |= 1 << lane;
        }
    }
    mask
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn coverage_mask_avx2(e0: &EdgeQuad, e1: &EdgeQuad, e2: &EdgeQuad) -> u8 {
    use core::arch::x86_64::*;

    let a = _mm256_loadu_si256(e0.v.as_ptr() as *const __m256i);
    let b = _mm256_loadu_si256(e1.v.as_ptr() as *const __m256i);
    let c = _mm256_loadu_si256(e2.v.as_ptr() as *const __m256i);

    // Sign bits or together lane-wise; movemask over the 64-bit lanes
    // then yields one "any edge negative" bit per pixel.
    let any_neg = _mm256_or_si256(_mm256_or_si256(a, b), c);
    let neg = _mm256_movemask_pd(_mm256_castsi256_pd(any_neg));
    (!neg & 0xF) as u8
}
