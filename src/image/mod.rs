//! Colour-range images, pyramids and colour distances.
//!
//! A `RangeImage` stores one [`LuvRange`] per pixel in row-major order with a
//! parallel `u8` mask (0 = masked). Pixels that are masked or outside the
//! image are never sampled by the correlator; accessors that may receive
//! out-of-range coordinates take signed values and bounds-check them.

use crate::util::{DiffMatchError, DiffMatchResult};

pub mod distance;
pub mod pyramid;

/// A colour range in Luv space, stored as the corners of an axis-aligned box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuvRange {
    /// Lower corner `(L, u, v)`.
    pub low: [f32; 3],
    /// Upper corner `(L, u, v)`.
    pub high: [f32; 3],
}

impl LuvRange {
    /// Creates a range from its two corners; each channel is reordered so
    /// `low <= high`.
    pub fn new(a: [f32; 3], b: [f32; 3]) -> Self {
        let mut low = [0.0; 3];
        let mut high = [0.0; 3];
        for c in 0..3 {
            low[c] = a[c].min(b[c]);
            high[c] = a[c].max(b[c]);
        }
        Self { low, high }
    }

    /// Degenerate range holding a single colour.
    pub fn point(l: f32, u: f32, v: f32) -> Self {
        Self {
            low: [l, u, v],
            high: [l, u, v],
        }
    }

    /// Centre of the box.
    pub fn centre(&self) -> [f32; 3] {
        [
            0.5 * (self.low[0] + self.high[0]),
            0.5 * (self.low[1] + self.high[1]),
            0.5 * (self.low[2] + self.high[2]),
        ]
    }
}

/// Owned colour-range image with a validity mask.
#[derive(Clone, Debug)]
pub struct RangeImage {
    data: Vec<LuvRange>,
    mask: Vec<u8>,
    width: usize,
    height: usize,
}

impl RangeImage {
    /// Creates an image where every pixel is valid.
    pub fn new(data: Vec<LuvRange>, width: usize, height: usize) -> DiffMatchResult<Self> {
        let len = pixel_count(width, height)?;
        let mask = vec![1u8; len];
        Self::with_mask(data, mask, width, height)
    }

    /// Creates an image with an explicit mask; zero entries mark masked pixels.
    pub fn with_mask(
        data: Vec<LuvRange>,
        mask: Vec<u8>,
        width: usize,
        height: usize,
    ) -> DiffMatchResult<Self> {
        let needed = pixel_count(width, height)?;
        if data.len() != needed {
            return Err(DiffMatchError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        if mask.len() != needed {
            return Err(DiffMatchError::BufferSizeMismatch {
                needed,
                got: mask.len(),
            });
        }
        Ok(Self {
            data,
            mask,
            width,
            height,
        })
    }

    /// Builds an image by evaluating `f` per pixel; `None` marks the pixel masked.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> DiffMatchResult<Self>
    where
        F: FnMut(usize, usize) -> Option<LuvRange>,
    {
        let len = pixel_count(width, height)?;
        let mut data = Vec::with_capacity(len);
        let mut mask = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                match f(x, y) {
                    Some(sample) => {
                        data.push(sample);
                        mask.push(1);
                    }
                    None => {
                        data.push(LuvRange::default());
                        mask.push(0);
                    }
                }
            }
        }
        Self::with_mask(data, mask, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true when `(x, y)` is inside the image and not masked.
    #[inline]
    pub fn valid(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.mask[y * self.width + x] != 0
    }

    /// Signed variant of [`RangeImage::valid`] for coordinates that may fall
    /// outside the image.
    #[inline]
    pub fn valid_ext(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && self.valid(x as usize, y as usize)
    }

    /// Returns the sample at `(x, y)`; panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &LuvRange {
        debug_assert!(x < self.width && y < self.height);
        &self.data[y * self.width + x]
    }

    /// Returns row `y` of samples, or `None` when out of range.
    pub fn row(&self, y: usize) -> Option<&[LuvRange]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns the mask buffer (0 = masked).
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }
}

fn pixel_count(width: usize, height: usize) -> DiffMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(DiffMatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(DiffMatchError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{LuvRange, RangeImage};

    #[test]
    fn new_orders_corners_per_channel() {
        let range = LuvRange::new([5.0, -1.0, 2.0], [1.0, 3.0, 2.0]);
        assert_eq!(range.low, [1.0, -1.0, 2.0]);
        assert_eq!(range.high, [5.0, 3.0, 2.0]);
        assert_eq!(range.centre(), [3.0, 1.0, 2.0]);
    }

    #[test]
    fn valid_ext_handles_negative_and_masked() {
        let img = RangeImage::from_fn(3, 2, |x, y| {
            (x != 1 || y != 1).then(|| LuvRange::point(x as f32, 0.0, 0.0))
        })
        .unwrap();
        assert!(img.valid_ext(0, 0));
        assert!(!img.valid_ext(-1, 0));
        assert!(!img.valid_ext(0, 2));
        assert!(!img.valid_ext(1, 1));
        assert!(!img.valid(3, 0));
        assert_eq!(img.get(2, 1).low[0], 2.0);
    }
}
