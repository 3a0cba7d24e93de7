//! Per-pixel direction weights derived from neighbour colour distances.

use crate::diffusion::Direction;
use crate::image::distance::ColorDistance;
use crate::image::RangeImage;
use crate::progress::{Progress, ProgressScope};
use crate::util::math::shift_index;

/// Diffusion weights for one image.
///
/// For a valid pixel the four weights sum to 1, unless every neighbour is
/// masked or outside the image, in which case all four are 0. Masked pixels
/// always carry 0 in every direction.
#[derive(Clone, Debug, Default)]
pub struct DiffusionWeight {
    data: Vec<[f32; 4]>,
    width: usize,
    height: usize,
}

impl DiffusionWeight {
    /// Creates an empty weight field; fill it with [`DiffusionWeight::create`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the field for `image`.
    ///
    /// Each finite neighbour distance `d` becomes `-exp(dist_mult * (d - low))`
    /// where `low` is the smallest finite distance of the pixel, and the four
    /// values are divided by their (negative) sum, so the weight grows with
    /// `d - low`. Masked and out-of-image neighbours get 0.
    pub fn create<D>(
        &mut self,
        image: &RangeImage,
        distance: &D,
        dist_mult: f32,
        progress: &mut dyn Progress,
    ) where
        D: ColorDistance + ?Sized,
    {
        let mut scope = ProgressScope::enter(progress);
        let width = image.width();
        let height = image.height();
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height, [0.0; 4]);

        for y in 0..height {
            scope.report(y, height);
            for x in 0..width {
                if !image.valid(x, y) {
                    continue;
                }
                let centre = image.get(x, y);
                let mut dist = [f32::INFINITY; 4];
                for dir in Direction::ALL {
                    let (dx, dy) = dir.step();
                    let neighbour = shift_index(x, dx, width)
                        .zip(shift_index(y, dy, height))
                        .filter(|&(nx, ny)| image.valid(nx, ny));
                    if let Some((nx, ny)) = neighbour {
                        dist[dir.index()] = distance.distance(centre, image.get(nx, ny));
                    }
                }
                self.data[y * width + x] = normalize(dist, dist_mult);
            }
        }
    }

    /// Returns the weight leaving `(x, y)` in `dir`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, dir: Direction) -> f32 {
        self.data[y * self.width + x][dir.index()]
    }

    /// Returns all four weights of `(x, y)` in [`Direction::ALL`] order.
    #[inline]
    pub fn weights(&self, x: usize, y: usize) -> [f32; 4] {
        self.data[y * self.width + x]
    }

    /// Width of the image the field was built for.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the image the field was built for.
    pub fn height(&self) -> usize {
        self.height
    }
}

fn normalize(dist: [f32; 4], dist_mult: f32) -> [f32; 4] {
    let low = dist.iter().copied().fold(f32::INFINITY, f32::min);
    // Exponents are shifted by their maximum so the largest term is exp(0).
    let mut exps = [f64::NEG_INFINITY; 4];
    for (e, d) in exps.iter_mut().zip(dist) {
        if d.is_finite() {
            *e = f64::from(dist_mult) * f64::from(d - low);
        }
    }
    let high = exps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out = [0.0f32; 4];
    if high == f64::NEG_INFINITY {
        return out;
    }
    let mut sum = 0.0f64;
    let mut raw = [0.0f64; 4];
    for (r, e) in raw.iter_mut().zip(exps) {
        if e.is_finite() {
            *r = (e - high).exp();
            sum += *r;
        }
    }
    for (w, r) in out.iter_mut().zip(raw) {
        *w = (r / sum) as f32;
    }
    out
}
