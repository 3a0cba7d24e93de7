//! Diffusion-weighted colour correlation.
//!
//! The cost of a pixel pair sums capped colour distances over the shared
//! diamond window, each weighted by the sum of both pixels' diffusion
//! weights, and halves the result. Samples that are masked or off either
//! image contribute the cap. The cost is symmetric in its two sides and
//! lies in `[0, dist_cap]`.

use crate::diffusion::RangeDiffusionSlice;
use crate::image::distance::ColorDistance;
use crate::image::RangeImage;
use crate::kernel::MatchCost;

/// Correlation between one scanline of each image.
pub struct DiffuseCorrelation<'a, D: ?Sized> {
    distance: &'a D,
    dist_cap: f32,
    image1: &'a RangeImage,
    slice1: &'a RangeDiffusionSlice,
    image2: &'a RangeImage,
    slice2: &'a RangeDiffusionSlice,
}

impl<'a, D> DiffuseCorrelation<'a, D>
where
    D: ColorDistance + ?Sized,
{
    /// Binds two (image, slice) pairs.
    ///
    /// # Panics
    ///
    /// Panics when the slices were built with different step counts.
    pub fn new(
        distance: &'a D,
        dist_cap: f32,
        image1: &'a RangeImage,
        slice1: &'a RangeDiffusionSlice,
        image2: &'a RangeImage,
        slice2: &'a RangeDiffusionSlice,
    ) -> Self {
        assert_eq!(
            slice1.steps(),
            slice2.steps(),
            "diffusion slices must share a step count"
        );
        Self {
            distance,
            dist_cap,
            image1,
            slice1,
            image2,
            slice2,
        }
    }
}

impl<D> MatchCost for DiffuseCorrelation<'_, D>
where
    D: ColorDistance + ?Sized,
{
    fn cost(&self, x1: usize, x2: usize) -> f32 {
        let steps = self.slice1.steps() as isize;
        let y1 = self.slice1.y() as isize;
        let y2 = self.slice2.y() as isize;
        let (x1i, x2i) = (x1 as isize, x2 as isize);

        let mut sum = 0.0f32;
        for v in -steps..=steps {
            let span = steps - v.abs();
            for u in -span..=span {
                let weight = self.slice1.get(x1, u, v) + self.slice2.get(x2, u, v);
                if weight == 0.0 {
                    continue;
                }
                let (ax1, ay1) = (x1i + u, y1 + v);
                let (ax2, ay2) = (x2i + u, y2 + v);
                let d = if self.image1.valid_ext(ax1, ay1) && self.image2.valid_ext(ax2, ay2) {
                    let a = self.image1.get(ax1 as usize, ay1 as usize);
                    let b = self.image2.get(ax2 as usize, ay2 as usize);
                    self.distance.distance(a, b).min(self.dist_cap)
                } else {
                    self.dist_cap
                };
                sum += weight * d;
            }
        }
        sum * 0.5
    }

    fn dist_cap(&self) -> f32 {
        self.dist_cap
    }

    fn width1(&self) -> usize {
        self.image1.width()
    }

    fn width2(&self) -> usize {
        self.image2.width()
    }
}
