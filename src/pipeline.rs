//! Frame-level rasterization driver.
//!
//! Once binning for a frame is complete the triangle buffer is read-only
//! and every tile's coverage is independent, so tiles are rasterized in
//! parallel. Within a tile, bins are walked in order so coverage emission
//! follows binning submission order.

use rayon::prelude::*;

use crate::raster::{rasterize_tile, PixelList, RasterTriangle, TileGrid};

/// Rasterizes every tile of the frame, in parallel, walking each tile's
/// bins in order. Returns one pixel list per tile, in the grid's
/// row-major tile order.
pub fn rasterize_frame(triangles: &[RasterTriangle], grid: &TileGrid) -> Vec<PixelList> {
    grid.tiles_slice()
        .par_iter()
        .map(|tile| {
            let mut sink = PixelList::new();
            for bin in 0..grid.bin_count() {
                rasterize_tile(bin, triangles, tile, &mut sink);
            }
            sink
        })
        .collect()
}
