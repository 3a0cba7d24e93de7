//! Colour distances between Luv ranges.
//!
//! The correlator only requires a distance to be deterministic, symmetric and
//! non-negative; both stock metrics satisfy that.

use crate::image::LuvRange;

/// Distance between two colour-range samples.
pub trait ColorDistance: Sync {
    /// Returns a non-negative distance; must be symmetric in its arguments.
    fn distance(&self, a: &LuvRange, b: &LuvRange) -> f32;
}

impl<F> ColorDistance for F
where
    F: Fn(&LuvRange, &LuvRange) -> f32 + Sync,
{
    #[inline]
    fn distance(&self, a: &LuvRange, b: &LuvRange) -> f32 {
        self(a, b)
    }
}

/// Euclidean gap between two boxes; zero whenever they overlap.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeGapDistance;

impl ColorDistance for RangeGapDistance {
    fn distance(&self, a: &LuvRange, b: &LuvRange) -> f32 {
        let mut sum = 0.0f32;
        for c in 0..3 {
            let gap = (a.low[c] - b.high[c]).max(b.low[c] - a.high[c]).max(0.0);
            sum += gap * gap;
        }
        sum.sqrt()
    }
}

/// Euclidean distance between box centres.
#[derive(Clone, Copy, Debug, Default)]
pub struct CentreDistance;

impl ColorDistance for CentreDistance {
    fn distance(&self, a: &LuvRange, b: &LuvRange) -> f32 {
        let ca = a.centre();
        let cb = b.centre();
        let mut sum = 0.0f32;
        for c in 0..3 {
            let d = ca[c] - cb[c];
            sum += d * d;
        }
        sum.sqrt()
    }
}
