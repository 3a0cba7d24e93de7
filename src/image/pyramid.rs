//! Multi-resolution stacks of colour-range images.
//!
//! Level 0 is full resolution. Every further level halves the width; the
//! height is halved too when the pyramid was built with `half_height`, and is
//! kept otherwise. Construction of the levels themselves happens upstream;
//! this type only checks that the supplied levels are consistent.

use crate::image::RangeImage;
use crate::util::math::is_half_of;
use crate::util::{DiffMatchError, DiffMatchResult};

/// Owned colour-range pyramid.
#[derive(Clone, Debug)]
pub struct RangePyramid {
    levels: Vec<RangeImage>,
    half_height: bool,
}

impl RangePyramid {
    /// Wraps prebuilt levels, finest first.
    pub fn from_levels(levels: Vec<RangeImage>, half_height: bool) -> DiffMatchResult<Self> {
        if levels.is_empty() {
            return Err(DiffMatchError::InvalidPyramid {
                level: 0,
                reason: "pyramid has no levels",
            });
        }
        for (idx, pair) in levels.windows(2).enumerate() {
            let (finer, coarser) = (&pair[0], &pair[1]);
            if !is_half_of(finer.width(), coarser.width()) {
                return Err(DiffMatchError::InvalidPyramid {
                    level: idx + 1,
                    reason: "width is not half of the finer level",
                });
            }
            let height_ok = if half_height {
                is_half_of(finer.height(), coarser.height())
            } else {
                finer.height() == coarser.height()
            };
            if !height_ok {
                return Err(DiffMatchError::InvalidPyramid {
                    level: idx + 1,
                    reason: if half_height {
                        "height is not half of the finer level"
                    } else {
                        "height differs from the finer level"
                    },
                });
            }
        }
        Ok(Self {
            levels,
            half_height,
        })
    }

    /// Single-level pyramid around a full-resolution image.
    pub fn single(image: RangeImage) -> Self {
        Self {
            levels: vec![image],
            half_height: false,
        }
    }

    /// Returns all levels (level 0 is the base resolution).
    pub fn levels(&self) -> &[RangeImage] {
        &self.levels
    }

    /// Returns the number of levels.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Returns a specific level.
    pub fn level(&self, index: usize) -> Option<&RangeImage> {
        self.levels.get(index)
    }

    /// Whether the height halves between successive levels.
    pub fn half_height(&self) -> bool {
        self.half_height
    }
}
