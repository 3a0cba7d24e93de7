//! Anisotropic diffusion of matching weight.
//!
//! [`DiffusionWeight`] turns local colour distances into per-pixel direction
//! weights; [`RangeDiffusionSlice`] walks unit mass outward from every pixel of
//! one scanline through those weights, producing a normalized diamond-shaped
//! window per pixel.

mod buffer;
mod slice;
mod weight;

pub use slice::RangeDiffusionSlice;
pub use weight::DiffusionWeight;

/// Grid direction, in the order used by [`DiffusionWeight`] storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `+x`
    PosX = 0,
    /// `+y`
    PosY = 1,
    /// `-x`
    NegX = 2,
    /// `-y`
    NegY = 3,
}

impl Direction {
    /// All directions in storage order.
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::PosY,
        Direction::NegX,
        Direction::NegY,
    ];

    /// Unit step `(dx, dy)` for this direction.
    #[inline]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::PosX => (1, 0),
            Direction::PosY => (0, 1),
            Direction::NegX => (-1, 0),
            Direction::NegY => (0, -1),
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
