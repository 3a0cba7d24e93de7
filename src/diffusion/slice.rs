//! Per-scanline diffusion windows.
//!
//! For every pixel of a scanline, unit mass is walked `steps` times through
//! the [`DiffusionWeight`] field. The resulting distribution over the diamond
//! `|u| + |v| <= steps` is stored compactly, one contiguous run per pixel, via
//! an offset table built from the window geometry.

use crate::diffusion::buffer::PingPong;
use crate::diffusion::{Direction, DiffusionWeight};
use crate::image::RangeImage;
use crate::progress::{Progress, ProgressScope};
use crate::util::math::{manhattan, shift_index};

/// Normalized diffusion windows for one scanline of one image.
///
/// Storage and scratch buffers are kept between calls to
/// [`RangeDiffusionSlice::create`] and only reallocated when the image width
/// or the step count changes; contents are always recomputed.
pub struct RangeDiffusionSlice {
    y: usize,
    steps: usize,
    width: usize,
    /// Cells per pixel: `2 * steps * (steps + 1) + 1`.
    cells: usize,
    /// Index from `(u + steps, v + steps)` to the cell run; `usize::MAX`
    /// outside the diamond.
    offset: Vec<usize>,
    data: Vec<f32>,
    buffers: PingPong,
}

impl Default for RangeDiffusionSlice {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeDiffusionSlice {
    /// Creates an empty slice; fill it with [`RangeDiffusionSlice::create`].
    pub fn new() -> Self {
        Self {
            y: 0,
            steps: 0,
            width: 0,
            cells: 0,
            offset: Vec::new(),
            data: Vec::new(),
            buffers: PingPong::new(),
        }
    }

    /// Computes the windows of scanline `y` of `image` after `steps` walks.
    ///
    /// Masked pixels get an all-zero window. A window whose surviving mass is
    /// at most 0.5 (the walk was mostly blocked) is left unnormalized.
    pub fn create(
        &mut self,
        y: usize,
        steps: usize,
        image: &RangeImage,
        weights: &DiffusionWeight,
        progress: &mut dyn Progress,
    ) {
        debug_assert_eq!(weights.width(), image.width());
        debug_assert_eq!(weights.height(), image.height());
        debug_assert!(y < image.height());

        let mut scope = ProgressScope::enter(progress);
        let width = image.width();
        scope.report(0, width + 1);

        self.y = y;
        self.rebuild_offsets(steps);
        if self.width != width || self.data.len() != width * self.cells {
            self.width = width;
            self.data.clear();
            self.data.resize(width * self.cells, 0.0);
        }
        self.buffers.ensure(steps);

        for x in 0..width {
            scope.report(x + 1, width + 1);
            let start = x * self.cells;
            if !image.valid(x, y) {
                self.data[start..start + self.cells].fill(0.0);
                continue;
            }
            self.walk(x, image, weights);
            self.store(x);
        }
    }

    fn rebuild_offsets(&mut self, steps: usize) {
        if steps == self.steps && !self.offset.is_empty() {
            return;
        }
        let side = 2 * steps + 1;
        let s = steps as isize;
        self.steps = steps;
        self.offset.clear();
        self.offset.resize(side * side, usize::MAX);
        let mut count = 0;
        for v in -s..=s {
            for u in -s..=s {
                if manhattan(u, v) <= steps {
                    self.offset[((v + s) as usize) * side + (u + s) as usize] = count;
                    count += 1;
                }
            }
        }
        self.cells = count;
    }

    fn walk(&mut self, x: usize, image: &RangeImage, weights: &DiffusionWeight) {
        let width = image.width();
        let height = image.height();
        self.buffers.seed();
        for round in 0..self.steps {
            self.buffers.clear_inactive(round + 1);
            let r = round as isize;
            for v in -r..=r {
                let Some(ay) = shift_index(self.y, v, height) else {
                    continue;
                };
                let span = r - v.abs();
                for u in -span..=span {
                    let Some(ax) = shift_index(x, u, width) else {
                        continue;
                    };
                    let mass = self.buffers.active(u, v);
                    if mass == 0.0 {
                        continue;
                    }
                    let w = weights.weights(ax, ay);
                    for dir in Direction::ALL {
                        let (du, dv) = dir.step();
                        self.buffers
                            .add_inactive(u + du, v + dv, mass * w[dir.index()]);
                    }
                }
            }
            self.buffers.swap();
        }
    }

    fn store(&mut self, x: usize) {
        let s = self.steps as isize;
        let side = 2 * self.steps + 1;
        let start = x * self.cells;
        for v in -s..=s {
            let span = s - v.abs();
            for u in -span..=span {
                let cell = self.offset[((v + s) as usize) * side + (u + s) as usize];
                self.data[start + cell] = self.buffers.active(u, v);
            }
        }

        let row = &mut self.data[start..start + self.cells];
        let sum: f32 = row.iter().sum();
        if sum > 0.5 {
            for value in row.iter_mut() {
                *value /= sum;
            }
        }
    }

    /// Width of the scanline.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Scanline the slice was built for.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Walk length the slice was built with.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Weight that pixel `x` sends to window offset `(u, v)`; 0 outside the
    /// diamond `|u| + |v| <= steps`.
    #[inline]
    pub fn get(&self, x: usize, u: isize, v: isize) -> f32 {
        if manhattan(u, v) > self.steps {
            return 0.0;
        }
        let s = self.steps as isize;
        let side = 2 * self.steps + 1;
        let cell = self.offset[((v + s) as usize) * side + (u + s) as usize];
        self.data[x * self.cells + cell]
    }

    /// Raw window of pixel `x` in storage order.
    pub fn window(&self, x: usize) -> &[f32] {
        &self.data[x * self.cells..(x + 1) * self.cells]
    }
}

#[cfg(test)]
mod tests {
    use super::RangeDiffusionSlice;
    use crate::diffusion::DiffusionWeight;
    use crate::image::distance::RangeGapDistance;
    use crate::image::{LuvRange, RangeImage};
    use crate::progress::NoProgress;

    fn flat(width: usize, height: usize) -> RangeImage {
        RangeImage::from_fn(width, height, |_, _| Some(LuvRange::point(50.0, 0.0, 0.0))).unwrap()
    }

    #[test]
    fn offset_table_counts_diamond_cells() {
        let img = flat(9, 9);
        let mut dw = DiffusionWeight::new();
        dw.create(&img, &RangeGapDistance, 1.0, &mut NoProgress);
        let mut slice = RangeDiffusionSlice::new();
        for steps in 0..4 {
            slice.create(4, steps, &img, &dw, &mut NoProgress);
            assert_eq!(slice.window(0).len(), 2 * steps * (steps + 1) + 1);
        }
    }

    #[test]
    fn zero_steps_keeps_all_mass_at_centre() {
        let img = flat(4, 3);
        let mut dw = DiffusionWeight::new();
        dw.create(&img, &RangeGapDistance, 1.0, &mut NoProgress);
        let mut slice = RangeDiffusionSlice::new();
        slice.create(1, 0, &img, &dw, &mut NoProgress);
        for x in 0..4 {
            assert_eq!(slice.get(x, 0, 0), 1.0);
            assert_eq!(slice.get(x, 1, 0), 0.0);
        }
    }

    #[test]
    fn one_step_matches_direction_weights() {
        let img = flat(5, 5);
        let mut dw = DiffusionWeight::new();
        dw.create(&img, &RangeGapDistance, 1.0, &mut NoProgress);
        let mut slice = RangeDiffusionSlice::new();
        slice.create(2, 1, &img, &dw, &mut NoProgress);
        // Interior pixel of a flat image spreads evenly, nothing stays put.
        assert!((slice.get(2, 1, 0) - 0.25).abs() < 1e-6);
        assert!((slice.get(2, 0, -1) - 0.25).abs() < 1e-6);
        assert_eq!(slice.get(2, 0, 0), 0.0);
        // Left edge pixel has three neighbours.
        assert!((slice.get(0, 1, 0) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(slice.get(0, -1, 0), 0.0);
    }

    #[test]
    fn reuse_across_geometry_changes_recomputes() {
        let small = flat(4, 4);
        let large = flat(7, 4);
        let mut dw_small = DiffusionWeight::new();
        dw_small.create(&small, &RangeGapDistance, 1.0, &mut NoProgress);
        let mut dw_large = DiffusionWeight::new();
        dw_large.create(&large, &RangeGapDistance, 1.0, &mut NoProgress);

        let mut reused = RangeDiffusionSlice::new();
        reused.create(1, 3, &small, &dw_small, &mut NoProgress);
        reused.create(2, 2, &large, &dw_large, &mut NoProgress);

        let mut fresh = RangeDiffusionSlice::new();
        fresh.create(2, 2, &large, &dw_large, &mut NoProgress);

        assert_eq!(reused.width(), 7);
        for x in 0..7 {
            assert_eq!(reused.window(x), fresh.window(x));
        }
    }
}
