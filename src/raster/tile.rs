//! Screen-space tile grid and per-bin triangle assignment lists.

use glam::IVec2;

use crate::error::GridError;

/// One triangle assigned to a tile.
///
/// The trivial-coverage flag is stored here, on the (tile, slot) record,
/// and never on the shared triangle: a triangle can trivially cover one
/// tile while only partially covering its neighbor, and mutating a shared
/// flag during binning would race across tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileAssignment {
    /// Index into the frame's shared triangle buffer.
    pub id: u32,
    /// True when the whole tile is inside the triangle.
    pub trivial: bool,
}

/// A fixed-size rectangular partition of the raster grid.
///
/// `min` is inclusive and `max` exclusive, so tiles partition the
/// framebuffer exactly: every pixel belongs to one tile. Each tile keeps
/// one assignment list per bin (worker partition); a worker only ever
/// appends to its own bin's list, so binning needs no locks.
#[derive(Clone, Debug)]
pub struct Tile {
    pub min: IVec2,
    pub max: IVec2,
    bins: Vec<Vec<TileAssignment>>,
}

impl Tile {
    fn new(min: IVec2, max: IVec2, bin_count: usize) -> Self {
        Self {
            min,
            max,
            bins: vec![Vec::new(); bin_count],
        }
    }

    /// Appends a triangle to this tile's list for `bin`.
    #[inline]
    pub fn push(&mut self, bin: usize, id: u32, trivial: bool) {
        self.bins[bin].push(TileAssignment { id, trivial });
    }

    /// The triangles assigned to `bin`, in append order.
    #[inline]
    pub fn assignments(&self, bin: usize) -> &[TileAssignment] {
        &self.bins[bin]
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Clears every bin list, keeping capacity for the next frame.
    pub fn clear(&mut self) {
        for bin in &mut self.bins {
            bin.clear();
        }
    }
}

/// All tiles for one screen resolution.
///
/// Allocated once at setup; [`TileGrid::reset`] clears assignment lists
/// between frames. Tile size is a power of two so the tile index of a
/// fixed-point coordinate is a single shift.
#[derive(Debug)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    /// Grid dimensions in tiles.
    dim: IVec2,
    tile_bits: u32,
    bin_count: usize,
    width: u32,
    height: u32,
}

impl TileGrid {
    /// Builds the grid for a `width` x `height` framebuffer with
    /// `tile_size`-pixel tiles and `bin_count` worker partitions per tile.
    /// Edge tiles are cropped to the framebuffer, so the tiles partition
    /// it exactly.
    pub fn new(width: u32, height: u32, tile_size: u32, bin_count: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyScreen { width, height });
        }
        if tile_size == 0 || !tile_size.is_power_of_two() {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        if bin_count == 0 {
            return Err(GridError::NoBins);
        }

        let dim = IVec2::new(
            width.div_ceil(tile_size) as i32,
            height.div_ceil(tile_size) as i32,
        );

        let mut tiles = Vec::with_capacity((dim.x * dim.y) as usize);
        for ty in 0..dim.y {
            for tx in 0..dim.x {
                let min = IVec2::new(tx * tile_size as i32, ty * tile_size as i32);
                let max = IVec2::new(
                    (min.x + tile_size as i32).min(width as i32),
                    (min.y + tile_size as i32).min(height as i32),
                );
                tiles.push(Tile::new(min, max, bin_count));
            }
        }

        Ok(Self {
            tiles,
            dim,
            tile_bits: tile_size.trailing_zeros(),
            bin_count,
            width,
            height,
        })
    }

    /// Grid dimensions in tiles.
    #[inline]
    pub fn dim(&self) -> IVec2 {
        self.dim
    }

    /// log2 of the tile size in pixels.
    #[inline]
    pub fn tile_bits(&self) -> u32 {
        self.tile_bits
    }

    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn tile(&self, tx: i32, ty: i32) -> &Tile {
        &self.tiles[(ty * self.dim.x + tx) as usize]
    }

    #[inline]
    pub fn tile_mut(&mut self, tx: i32, ty: i32) -> &mut Tile {
        &mut self.tiles[(ty * self.dim.x + tx) as usize]
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles_slice(&self) -> &[Tile] {
        &self.tiles
    }

    /// Clears every tile's assignment lists for the next frame.
    pub fn reset(&mut self) {
        for tile in &mut self.tiles {
            tile.clear();
        }
    }
}
