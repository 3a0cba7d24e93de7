//! Ordered match collections for one pyramid level.

/// Candidate correspondence between a left and a right pixel on scanline `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Scanline at the match's pyramid level.
    pub y: usize,
    /// X coordinate in the left image.
    pub x_left: usize,
    /// X coordinate in the right image.
    pub x_right: usize,
    /// Correlation distance; lower is better.
    pub score: f32,
}

impl Match {
    #[inline]
    fn key(&self) -> (usize, usize, usize) {
        (self.y, self.x_left, self.x_right)
    }
}

/// Matches of one level sorted by `(y, x_left, x_right)`.
///
/// Repeated triples are collapsed to their first occurrence; since a triple's
/// score depends only on the pair of pixels, duplicates carry the same score.
#[derive(Clone, Debug, Default)]
pub struct MatchSet {
    matches: Vec<Match>,
}

impl MatchSet {
    /// Sorts and deduplicates `matches`.
    pub fn from_matches(mut matches: Vec<Match>) -> Self {
        matches.sort_by_key(Match::key);
        matches.dedup_by_key(|m| m.key());
        Self { matches }
    }

    /// Number of distinct matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true when the set holds no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// All matches in order.
    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }

    /// Non-empty runs of matches sharing a scanline, in ascending `y`.
    pub fn rows(&self) -> impl Iterator<Item = &[Match]> + '_ {
        self.matches.chunk_by(|a, b| a.y == b.y)
    }

    /// Matches on scanline `y`, ordered by `(x_left, x_right)`.
    pub fn row(&self, y: usize) -> &[Match] {
        let start = self.matches.partition_point(|m| m.y < y);
        let end = self.matches.partition_point(|m| m.y <= y);
        &self.matches[start..end]
    }

    /// Score of the exact triple, if present.
    pub fn score(&self, y: usize, x_left: usize, x_right: usize) -> Option<f32> {
        self.matches
            .binary_search_by_key(&(y, x_left, x_right), Match::key)
            .ok()
            .map(|idx| self.matches[idx].score)
    }
}
