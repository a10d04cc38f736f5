//! Fixed-point screen coordinates.
//!
//! Raster coordinates are integers scaled by a constant binary-point shift
//! ([`FRAC_BITS`]). Keeping them in a distinct type forces every conversion
//! to/from pixel-space integers to be explicit, so tile shifts and pixel
//! shifts cannot be silently mixed.

use std::ops::{Add, Sub};

/// Number of fractional bits in a fixed-point screen coordinate.
pub const FRAC_BITS: u32 = 4;

/// Half a pixel in raw fixed-point units, used to sample at pixel centers.
pub const HALF_PIXEL: i32 = 1 << (FRAC_BITS - 1);

/// A screen coordinate in `1/2^FRAC_BITS` pixel units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    /// Converts a floating-point pixel coordinate, rounding to the nearest
    /// representable sub-pixel position.
    #[inline]
    pub fn from_f32(v: f32) -> Self {
        Fixed((v * (1 << FRAC_BITS) as f32).round() as i32)
    }

    /// Converts a whole-pixel coordinate.
    #[inline]
    pub fn from_pixel(px: i32) -> Self {
        Fixed(px << FRAC_BITS)
    }

    /// The center of a pixel, offset half a pixel from its origin.
    #[inline]
    pub fn center_of_pixel(px: i32) -> Self {
        Fixed((px << FRAC_BITS) + HALF_PIXEL)
    }

    /// Truncates to the containing pixel. Arithmetic shift, so negative
    /// coordinates floor toward negative infinity.
    #[inline]
    pub fn to_pixel(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// The tile index containing this coordinate, for a `1 << tile_bits`
    /// pixel tile size.
    #[inline]
    pub fn to_tile(self, tile_bits: u32) -> i32 {
        self.0 >> (FRAC_BITS + tile_bits)
    }

    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        Fixed(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        Fixed(self.0.max(other.0))
    }
}

impl Add for Fixed {
    type Output = Fixed;

    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

/// A screen-space position in fixed-point units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedPt {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPt {
    #[inline]
    pub fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Converts a floating-point pixel position.
    #[inline]
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self {
            x: Fixed::from_f32(x),
            y: Fixed::from_f32(y),
        }
    }

    /// Converts a whole-pixel position.
    #[inline]
    pub fn from_pixel(x: i32, y: i32) -> Self {
        Self {
            x: Fixed::from_pixel(x),
            y: Fixed::from_pixel(y),
        }
    }
}
