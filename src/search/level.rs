//! One pyramid level of the image pair, ready for correlation.

use crate::diffusion::{DiffusionWeight, RangeDiffusionSlice};
use crate::image::distance::ColorDistance;
use crate::image::RangeImage;
use crate::kernel::DiffuseCorrelation;
use crate::progress::Progress;
use crate::util::{DiffMatchError, DiffMatchResult};

/// Left and right images of one level with their diffusion weights.
///
/// Built once per level; the search stages (`brute_force`, `propagate`,
/// `compact`) then construct scanline slices on demand.
pub struct LevelSearch<'a, D: ?Sized> {
    distance: &'a D,
    steps: usize,
    left: &'a RangeImage,
    right: &'a RangeImage,
    left_weights: DiffusionWeight,
    right_weights: DiffusionWeight,
}

impl<'a, D> LevelSearch<'a, D>
where
    D: ColorDistance + ?Sized,
{
    /// Computes diffusion weights for both images.
    ///
    /// Cancellation is polled before each image's weights are built.
    ///
    /// `dist_mult` only shapes the diffusion weights; the correlation itself
    /// uses raw capped distances.
    pub fn new(
        distance: &'a D,
        dist_mult: f32,
        steps: usize,
        left: &'a RangeImage,
        right: &'a RangeImage,
        progress: &mut dyn Progress,
    ) -> DiffMatchResult<Self> {
        if left.height() != right.height() {
            return Err(DiffMatchError::PyramidMismatch {
                reason: "left and right heights differ",
            });
        }
        let mut left_weights = DiffusionWeight::new();
        let mut right_weights = DiffusionWeight::new();
        for (weights, image) in [(&mut left_weights, left), (&mut right_weights, right)] {
            if progress.is_cancelled() {
                return Err(DiffMatchError::Cancelled);
            }
            weights.create(image, distance, dist_mult, progress);
        }
        Ok(Self {
            distance,
            steps,
            left,
            right,
            left_weights,
            right_weights,
        })
    }

    /// Left image of this level.
    pub fn left(&self) -> &'a RangeImage {
        self.left
    }

    /// Right image of this level.
    pub fn right(&self) -> &'a RangeImage {
        self.right
    }

    /// Diffusion walk length used for every slice.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Shared scanline count of both images.
    pub fn height(&self) -> usize {
        self.left.height()
    }
}

/// Reusable pair of scanline slices, one per image.
pub(crate) struct RowSlices {
    left: RangeDiffusionSlice,
    right: RangeDiffusionSlice,
}

impl RowSlices {
    pub(crate) fn new() -> Self {
        Self {
            left: RangeDiffusionSlice::new(),
            right: RangeDiffusionSlice::new(),
        }
    }

    /// Rebuilds both slices for scanline `y`.
    pub(crate) fn fill<D>(&mut self, search: &LevelSearch<'_, D>, y: usize, progress: &mut dyn Progress)
    where
        D: ColorDistance + ?Sized,
    {
        self.left
            .create(y, search.steps, search.left, &search.left_weights, progress);
        self.right
            .create(y, search.steps, search.right, &search.right_weights, progress);
    }

    /// Correlation between the two filled slices.
    pub(crate) fn correlation<'s, D>(
        &'s self,
        search: &'s LevelSearch<'_, D>,
        dist_cap: f32,
    ) -> DiffuseCorrelation<'s, D>
    where
        D: ColorDistance + ?Sized,
    {
        DiffuseCorrelation::new(
            search.distance,
            dist_cap,
            search.left,
            &self.left,
            search.right,
            &self.right,
        )
    }
}
