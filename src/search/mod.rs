//! Coarse-to-fine stereo correlation.
//!
//! The coarsest pyramid level is searched exhaustively. Each finer level only
//! evaluates pairs around parent matches whose score beat the pruning
//! threshold, and level 0 is finally compacted into per-pixel candidate lists.

pub(crate) mod coarse;
pub(crate) mod compact;
mod correlator;
pub(crate) mod level;
pub(crate) mod matches;
pub(crate) mod propagate;

pub use correlator::{DiffusionCorrelationImage, StereoCandidates};
pub use level::LevelSearch;
pub use matches::{Match, MatchSet};

use crate::util::{DiffMatchError, DiffMatchResult};

/// Parameters of a correlation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CorrelationConfig {
    /// Maximum number of candidates kept per pixel.
    pub maxima_limit: usize,
    /// Distance cap at level 0.
    pub base_dist_cap: f32,
    /// Factor applied to the cap for each coarser level.
    pub dist_cap_mult: f32,
    /// A match propagates only if its score is below `cap * dist_cap_threshold`.
    pub dist_cap_threshold: f32,
    /// Neighbouring offsets stored on each side of a candidate.
    pub range: usize,
    /// Diffusion walk length.
    pub steps: usize,
    /// Evaluate the coarsest level row-parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            maxima_limit: 8,
            base_dist_cap: 1.0,
            dist_cap_mult: 2.0,
            dist_cap_threshold: 0.5,
            range: 2,
            steps: 5,
            parallel: false,
        }
    }
}

impl CorrelationConfig {
    /// Checks parameter ranges.
    pub fn validate(&self) -> DiffMatchResult<()> {
        if self.maxima_limit == 0 {
            return Err(DiffMatchError::InvalidConfig(
                "maxima_limit must be at least 1",
            ));
        }
        if !self.base_dist_cap.is_finite() || self.base_dist_cap <= 0.0 {
            return Err(DiffMatchError::InvalidConfig(
                "base_dist_cap must be finite and positive",
            ));
        }
        if !self.dist_cap_mult.is_finite() || self.dist_cap_mult <= 1.0 {
            return Err(DiffMatchError::InvalidConfig(
                "dist_cap_mult must be finite and greater than 1",
            ));
        }
        if !self.dist_cap_threshold.is_finite() || self.dist_cap_threshold <= 0.0 {
            return Err(DiffMatchError::InvalidConfig(
                "dist_cap_threshold must be finite and positive",
            ));
        }
        if self.parallel && cfg!(not(feature = "rayon")) {
            return Err(DiffMatchError::InvalidConfig(
                "parallel requires the rayon feature",
            ));
        }
        Ok(())
    }

    /// Distance cap per level: `base_dist_cap * dist_cap_mult^level`.
    pub fn dist_caps(&self, levels: usize) -> Vec<f32> {
        let mut caps = Vec::with_capacity(levels);
        let mut cap = self.base_dist_cap;
        for _ in 0..levels {
            caps.push(cap);
            cap *= self.dist_cap_mult;
        }
        caps
    }
}
