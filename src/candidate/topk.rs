//! Top-K tracking of the lowest-cost disparities for one pixel.

use std::cmp::Ordering;

/// Candidate disparity for a pixel: the opposing image x and its cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Candidate {
    /// X coordinate in the opposing image.
    pub disparity: usize,
    /// Correlation distance; lower is better.
    pub score: f32,
}

/// Orders candidates best first: lower score, then smaller displacement from
/// `origin`, then smaller disparity.
fn candidate_cmp(origin: usize, a: &Candidate, b: &Candidate) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.disparity.abs_diff(origin).cmp(&b.disparity.abs_diff(origin)))
        .then_with(|| a.disparity.cmp(&b.disparity))
}

const PREALLOC_LIMIT: usize = 16;

/// Top-K container with O(k) insertion cost.
pub(crate) struct TopK {
    k: usize,
    origin: usize,
    items: Vec<Candidate>,
}

impl TopK {
    /// Creates a collector for the pixel at x coordinate `origin`.
    ///
    /// Storage grows on demand, so `k` may be arbitrarily large.
    pub(crate) fn new(k: usize, origin: usize) -> Self {
        Self {
            k,
            origin,
            items: Vec::with_capacity(k.min(PREALLOC_LIMIT)),
        }
    }

    /// Pushes a candidate, evicting the worst if at capacity.
    pub(crate) fn push(&mut self, cand: Candidate) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(cand);
            return;
        }

        let origin = self.origin;
        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if candidate_cmp(origin, item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if candidate_cmp(origin, &cand, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = cand;
        }
    }

    /// Returns candidates best first.
    pub(crate) fn into_sorted(mut self) -> Vec<Candidate> {
        let origin = self.origin;
        self.items.sort_by(|a, b| candidate_cmp(origin, a, b));
        self.items
    }
}
