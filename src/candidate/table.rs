//! Sparse per-pixel candidate tables.
//!
//! Layout is CSR over pixels in raster order: `offsets[p]..offsets[p + 1]`
//! indexes the candidates of pixel `p` in `disparities`, and candidate `k`
//! owns `scores[k * window..(k + 1) * window]` with `window = 2 * range + 1`,
//! the centre entry being the candidate's own score.

use crate::refine::quad1d::quad_min_offset_1d;

/// Candidate disparities for every pixel of one image, best first.
#[derive(Clone, Debug)]
pub struct CandidateTable {
    width: usize,
    height: usize,
    range: usize,
    offsets: Vec<usize>,
    disparities: Vec<usize>,
    scores: Vec<f32>,
}

impl CandidateTable {
    /// Image width the table covers.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height the table covers.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of neighbouring offsets stored on each side of a candidate.
    pub fn range(&self) -> usize {
        self.range
    }

    /// Total number of candidates over all pixels.
    pub fn total_candidates(&self) -> usize {
        self.disparities.len()
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} table",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    fn candidate(&self, x: usize, y: usize, i: usize) -> usize {
        let p = self.pixel(x, y);
        let start = self.offsets[p];
        let count = self.offsets[p + 1] - start;
        assert!(i < count, "candidate {i} out of range, pixel has {count}");
        start + i
    }

    /// Number of candidates for `(x, y)`; 0 when the search never reached it.
    pub fn count(&self, x: usize, y: usize) -> usize {
        let p = self.pixel(x, y);
        self.offsets[p + 1] - self.offsets[p]
    }

    /// Opposing-image x of candidate `i` of `(x, y)`.
    pub fn disparity(&self, x: usize, y: usize, i: usize) -> usize {
        self.disparities[self.candidate(x, y, i)]
    }

    /// Score of candidate `i` of `(x, y)` with the opposing x shifted by
    /// `offset`, which must lie in `[-range, range]`.
    pub fn score(&self, x: usize, y: usize, i: usize, offset: isize) -> f32 {
        assert!(
            offset.unsigned_abs() <= self.range,
            "offset {offset} outside [-{0}, {0}]",
            self.range
        );
        let window = 2 * self.range + 1;
        let k = self.candidate(x, y, i);
        self.scores[k * window + (self.range as isize + offset) as usize]
    }

    /// Full score window of candidate `i` of `(x, y)`, from `-range` to `range`.
    pub fn scores(&self, x: usize, y: usize, i: usize) -> &[f32] {
        let window = 2 * self.range + 1;
        let k = self.candidate(x, y, i);
        &self.scores[k * window..(k + 1) * window]
    }

    /// Subpixel opposing x of candidate `i`, from a parabola through the
    /// scores at offsets -1, 0 and +1. Falls back to the integer disparity
    /// when `range == 0` or the fit is not a stable minimum.
    pub fn refined_disparity(&self, x: usize, y: usize, i: usize) -> f32 {
        let disparity = self.disparity(x, y, i) as f32;
        if self.range == 0 {
            return disparity;
        }
        let w = self.scores(x, y, i);
        let c = self.range;
        match quad_min_offset_1d(w[c - 1], w[c], w[c + 1]) {
            Some(dx) => disparity + dx,
            None => disparity,
        }
    }
}

/// Fills a [`CandidateTable`] pixel by pixel in raster order.
pub(crate) struct CandidateTableBuilder {
    table: CandidateTable,
}

impl CandidateTableBuilder {
    pub(crate) fn new(width: usize, height: usize, range: usize) -> Self {
        let mut offsets = Vec::with_capacity(width * height + 1);
        offsets.push(0);
        Self {
            table: CandidateTable {
                width,
                height,
                range,
                offsets,
                disparities: Vec::new(),
                scores: Vec::new(),
            },
        }
    }

    /// Appends a candidate to the current pixel.
    pub(crate) fn push<I>(&mut self, disparity: usize, window: I)
    where
        I: IntoIterator<Item = f32>,
    {
        let before = self.table.scores.len();
        self.table.disparities.push(disparity);
        self.table.scores.extend(window);
        debug_assert_eq!(self.table.scores.len() - before, 2 * self.table.range + 1);
    }

    /// Closes the current pixel and moves to the next one.
    pub(crate) fn end_pixel(&mut self) {
        let len = self.table.disparities.len();
        self.table.offsets.push(len);
    }

    /// Closes `n` pixels that received no candidates.
    pub(crate) fn skip_pixels(&mut self, n: usize) {
        let len = self.table.disparities.len();
        let new_len = self.table.offsets.len() + n;
        self.table.offsets.resize(new_len, len);
    }

    pub(crate) fn finish(self) -> CandidateTable {
        debug_assert_eq!(
            self.table.offsets.len(),
            self.table.width * self.table.height + 1
        );
        self.table
    }
}
