//! Per-tile rasterization of binned triangles.
//!
//! Walks one tile's assignment list for one bin and produces per-pixel
//! coverage through 2x2-block edge evaluation ([`crate::raster::kernel`]).
//! Covered pixels are handed to a [`CoverageSink`] together with the raw
//! edge values at the pixel center, which the downstream shading stage can
//! turn into barycentric weights via
//! [`RasterTriangle::barycentric`](crate::raster::RasterTriangle::barycentric).

use crate::raster::kernel::{coverage_mask, EdgeQuad, LANE_OFFSETS};
use crate::raster::tile::Tile;
use crate::raster::RasterTriangle;

/// Receiver for covered pixels; the seam to the external shading and
/// depth stages.
pub trait CoverageSink {
    /// Called once per covered pixel. `edge_values` holds the triangle's
    /// three edge functions evaluated at the pixel center.
    fn cover(&mut self, x: i32, y: i32, tri: &RasterTriangle, edge_values: [i64; 3]);
}

/// A covered pixel recorded by [`PixelList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoveredPixel {
    pub x: i32,
    pub y: i32,
    pub id: u32,
}

/// Simple sink collecting covered pixels in emission order.
#[derive(Default)]
pub struct PixelList {
    pub pixels: Vec<CoveredPixel>,
}

impl PixelList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoverageSink for PixelList {
    #[inline]
    fn cover(&mut self, x: i32, y: i32, tri: &RasterTriangle, _edge_values: [i64; 3]) {
        self.pixels.push(CoveredPixel { x, y, id: tri.id });
    }
}

/// Rasterizes every triangle assigned to `tile` under `bin`, in append
/// order.
///
/// The triangle buffer is read-only and shared; the tile's pixel region
/// is owned exclusively by the (tile, bin) pair, so tiles can be
/// rasterized in parallel.
pub fn rasterize_tile(
    bin: usize,
    triangles: &[RasterTriangle],
    tile: &Tile,
    sink: &mut impl CoverageSink,
) {
    for assignment in tile.assignments(bin) {
        let tri = &triangles[assignment.id as usize];

        let (bmin_x, bmin_y, bmax_x, bmax_y) = tri.bounds();

        // Pixel box: triangle bounds intersected with the tile. Tile max
        // is exclusive, the box inclusive.
        let lo_x = tile.min.x.max(bmin_x.to_pixel());
        let lo_y = tile.min.y.max(bmin_y.to_pixel());
        let max_x = (tile.max.x - 1).min(bmax_x.to_pixel());
        let max_y = (tile.max.y - 1).min(bmax_y.to_pixel());

        // No visible pixels in this tile; the next assignment may still
        // have some.
        if max_x < lo_x || max_y < lo_y {
            continue;
        }

        // Align the box base down to even coordinates for 2x2 blocks.
        // Lanes that fall below the unaligned box are masked out below.
        let min_x = lo_x & !1;
        let min_y = lo_y & !1;

        let x_steps = [
            EdgeQuad::x_step(&tri.edges[0]),
            EdgeQuad::x_step(&tri.edges[1]),
            EdgeQuad::x_step(&tri.edges[2]),
        ];
        let y_steps = [
            EdgeQuad::y_step(&tri.edges[0]),
            EdgeQuad::y_step(&tri.edges[1]),
            EdgeQuad::y_step(&tri.edges[2]),
        ];

        let mut row = [
            EdgeQuad::eval(&tri.edges[0], min_x, min_y),
            EdgeQuad::eval(&tri.edges[1], min_x, min_y),
            EdgeQuad::eval(&tri.edges[2], min_x, min_y),
        ];

        let mut py = min_y;
        while py <= max_y {
            let mut quad = row;
            let mut px = min_x;
            while px <= max_x {
                // A trivially covering triangle contains the whole tile,
                // and the box is already clipped to the tile, so the
                // inside test can be skipped. Edge values keep stepping
                // either way so the sink always gets them.
                let mask = if assignment.trivial {
                    0b1111
                } else {
                    coverage_mask(&quad[0], &quad[1], &quad[2])
                };

                if mask != 0 {
                    for (lane, (ox, oy)) in LANE_OFFSETS.iter().enumerate() {
                        if mask >> lane & 1 == 0 {
                            continue;
                        }
                        let x = px + ox;
                        let y = py + oy;
                        if x < lo_x || y < lo_y || x > max_x || y > max_y {
                            continue;
                        }
                        sink.cover(
                            x,
                            y,
                            tri,
                            [quad[0].v[lane], quad[1].v[lane], quad[2].v[lane]],
                        );
                    }
                }

                for i in 0..3 {
                    quad[i].step(x_steps[i]);
                }
                px += 2;
            }

            for i in 0..3 {
                row[i].step(y_steps[i]);
            }
            py += 2;
        }
    }
}
