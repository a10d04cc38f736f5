//! Triangle-to-tile assignment with trivial accept/reject classification.
//!
//! For each triangle the binner visits the tiles overlapped by its
//! bounding box. Per tile, each edge function is evaluated at a single
//! precomputed tile corner: the corner where the edge is largest (trivial
//! reject) or smallest (trivial accept). One negative reject-corner value
//! proves the tile is entirely outside the triangle; three non-negative
//! accept-corner values prove it is entirely inside. No per-pixel work
//! happens here.

use crate::fixed::{Fixed, FRAC_BITS};
use crate::raster::tile::TileGrid;
use crate::raster::RasterTriangle;

/// Assigns every triangle in the buffer to the tiles it may overlap,
/// appending to each tile's list for `bin`.
///
/// The bin is an explicit parameter: a worker owns its bin slot in every
/// tile, so concurrent binning across workers needs no synchronization.
/// Tile indices derived from the bounding box are clamped to the grid
/// range before any tile access; a bbox entirely outside the grid assigns
/// the triangle to no tiles at all.
pub fn assign_triangles(bin: usize, triangles: &[RasterTriangle], grid: &mut TileGrid) {
    let tile_bits = grid.tile_bits();
    let dim = grid.dim();

    for tri in triangles {
        let (min_x, min_y, max_x, max_y) = tri.bounds();

        let min_tx = min_x.to_tile(tile_bits);
        let min_ty = min_y.to_tile(tile_bits);
        let max_tx = max_x.to_tile(tile_bits);
        let max_ty = max_y.to_tile(tile_bits);

        // Entirely off the grid: zero tiles, before any clamping can
        // fold the bbox back into range.
        if max_tx < 0 || max_ty < 0 || min_tx >= dim.x || min_ty >= dim.y {
            continue;
        }

        // Span test uses the unclamped bbox: clamping can shrink a large
        // triangle's span and must not demote it to the fast path.
        let small = max_tx - min_tx < 2 && max_ty - min_ty < 2;

        // Mandatory clamp; tile indices index the grid directly.
        let min_tx = min_tx.clamp(0, dim.x - 1);
        let max_tx = max_tx.clamp(0, dim.x - 1);
        let min_ty = min_ty.clamp(0, dim.y - 1);
        let max_ty = max_ty.clamp(0, dim.y - 1);

        // A bbox spanning at most 2 tiles per axis can never fully cover
        // a tile (a triangle covers at most half of its own bbox), so
        // skip the corner tests and register everywhere unclassified.
        if small {
            for ty in min_ty..=max_ty {
                for tx in min_tx..=max_tx {
                    grid.tile_mut(tx, ty).push(bin, tri.id, false);
                }
            }
            continue;
        }

        for ty in min_ty..=max_ty {
            for tx in min_tx..=max_tx {
                if trivially_rejected(tri, tx, ty, tile_bits) {
                    continue;
                }
                let trivial = trivially_accepted(tri, tx, ty, tile_bits);
                grid.tile_mut(tx, ty).push(bin, tri.id, trivial);
            }
        }
    }
}

/// Fixed-point position of a tile corner. `corner` encodes the offset as
/// `x = corner % 2`, `y = corner / 2` in whole tiles.
#[inline]
fn corner_pos(tx: i32, ty: i32, corner: u8, tile_bits: u32) -> (Fixed, Fixed) {
    let shift = FRAC_BITS + tile_bits;
    (
        Fixed::from_raw((tx + (corner % 2) as i32) << shift),
        Fixed::from_raw((ty + (corner / 2) as i32) << shift),
    )
}

/// True when some edge is negative at its most-inside tile corner, which
/// puts the whole tile outside the triangle.
#[inline]
fn trivially_rejected(tri: &RasterTriangle, tx: i32, ty: i32, tile_bits: u32) -> bool {
    for i in 0..3 {
        let (x, y) = corner_pos(tx, ty, tri.reject_corner[i], tile_bits);
        if tri.edges[i].eval(x, y) < 0 {
            return true;
        }
    }
    false
}

/// True when every edge is non-negative at its least-inside tile corner,
/// which puts the whole tile inside the triangle.
#[inline]
fn trivially_accepted(tri: &RasterTriangle, tx: i32, ty: i32, tile_bits: u32) -> bool {
    for i in 0..3 {
        let (x, y) = corner_pos(tx, ty, tri.accept_corner[i], tile_bits);
        if tri.edges[i].eval(x, y) < 0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned_tiles(grid: &TileGrid, bin: usize) -> Vec<(i32, i32, bool)> {
        let mut out = Vec::new();
        for ty in 0..grid.dim().y {
            for tx in 0..grid.dim().x {
                for a in grid.tile(tx, ty).assignments(bin) {
                    out.push((tx, ty, a.trivial));
                }
            }
        }
        out
    }

    #[test]
    fn off_grid_triangle_is_assigned_nowhere() {
        let mut grid = TileGrid::new(64, 64, 8, 1).unwrap();
        let tri =
            RasterTriangle::setup_from_f32(0, (100.0, 100.0), (140.0, 100.0), (100.0, 140.0))
                .unwrap();
        assign_triangles(0, &[tri], &mut grid);
        assert!(assigned_tiles(&grid, 0).is_empty());

        // Negative side too
        let tri =
            RasterTriangle::setup_from_f32(1, (-50.0, -50.0), (-10.0, -50.0), (-50.0, -10.0))
                .unwrap();
        assign_triangles(0, &[tri], &mut grid);
        assert!(assigned_tiles(&grid, 0).is_empty());
    }

    #[test]
    fn sub_tile_triangle_is_never_trivial() {
        let mut grid = TileGrid::new(64, 64, 8, 1).unwrap();
        // 3x3 pixels inside tile (0, 0)
        let tri = RasterTriangle::setup_from_f32(0, (1.0, 1.0), (4.0, 1.0), (1.0, 4.0)).unwrap();
        assign_triangles(0, &[tri], &mut grid);

        let tiles = assigned_tiles(&grid, 0);
        assert_eq!(tiles, vec![(0, 0, false)]);
    }

    #[test]
    fn small_triangle_registers_in_every_bbox_tile_unclassified() {
        let mut grid = TileGrid::new(32, 32, 8, 1).unwrap();
        // 10x10 bbox straddling 4 tiles: fast path, no classification
        let tri = RasterTriangle::setup_from_f32(0, (0.0, 0.0), (10.0, 0.0), (0.0, 10.0)).unwrap();
        assign_triangles(0, &[tri], &mut grid);

        let tiles = assigned_tiles(&grid, 0);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|&(_, _, trivial)| !trivial));
    }

    #[test]
    fn fully_covering_triangle_marks_one_tile_trivial() {
        // 2x2 grid of 8-pixel tiles; the right triangle fully covers tile
        // (0, 0) and partially covers the other three. Its bbox reaches
        // tile index 2 and must be clamped back onto the grid.
        let mut grid = TileGrid::new(16, 16, 8, 1).unwrap();
        let tri = RasterTriangle::setup_from_f32(0, (0.0, 0.0), (20.0, 0.0), (0.0, 20.0)).unwrap();
        assign_triangles(0, &[tri], &mut grid);

        let tiles = assigned_tiles(&grid, 0);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.contains(&(0, 0, true)));
        assert!(tiles.contains(&(1, 0, false)));
        assert!(tiles.contains(&(0, 1, false)));
        assert!(tiles.contains(&(1, 1, false)));
    }

    #[test]
    fn tiles_outside_the_triangle_are_trivially_rejected() {
        // Same triangle on a larger grid: tile (2, 2) is inside the bbox
        // but fully outside the hypotenuse.
        let mut grid = TileGrid::new(32, 32, 8, 1).unwrap();
        let tri = RasterTriangle::setup_from_f32(0, (0.0, 0.0), (20.0, 0.0), (0.0, 20.0)).unwrap();
        assign_triangles(0, &[tri], &mut grid);

        assert!(grid.tile(2, 2).assignments(0).is_empty());
        assert!(!grid.tile(2, 0).assignments(0).is_empty());
        assert!(!grid.tile(0, 2).assignments(0).is_empty());
    }

    #[test]
    fn bin_parameter_selects_the_assignment_list() {
        let mut grid = TileGrid::new(32, 32, 8, 2).unwrap();
        let tri = RasterTriangle::setup_from_f32(3, (1.0, 1.0), (4.0, 1.0), (1.0, 4.0)).unwrap();
        assign_triangles(1, &[tri], &mut grid);

        assert!(grid.tile(0, 0).assignments(0).is_empty());
        assert_eq!(grid.tile(0, 0).assignments(1).len(), 1);
        assert_eq!(grid.tile(0, 0).assignments(1)[0].id, 3);
    }
}
