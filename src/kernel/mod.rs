//! Matching cost kernels.

/// Cost of pairing pixel `x1` of one scanline with pixel `x2` of another.
///
/// Lower is better. Implementations are bound to a specific pair of
/// scanlines when constructed.
pub trait MatchCost {
    /// Returns the matching cost; always finite.
    fn cost(&self, x1: usize, x2: usize) -> f32;

    /// Upper bound applied to every per-sample distance.
    fn dist_cap(&self) -> f32;

    /// Width of the first scanline.
    fn width1(&self) -> usize;

    /// Width of the second scanline.
    fn width2(&self) -> usize;
}

mod diffuse;

pub use diffuse::DiffuseCorrelation;
