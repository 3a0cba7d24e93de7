//! Propagation of surviving matches to the next finer level.
//!
//! A parent match at `(y, x_left, x_right)` expands to the 4x4 block
//! `[2x_left - 1, 2x_left + 2] x [2x_right - 1, 2x_right + 2]` (clamped) on
//! scanline `2y` and `2y + 1` when the pyramid halves its height, or on `y`
//! when it does not. Parents scoring at or above `prune_below` are dropped.

use crate::image::distance::ColorDistance;
use crate::kernel::MatchCost;
use crate::progress::{Progress, ProgressScope};
use crate::search::level::{LevelSearch, RowSlices};
use crate::search::matches::{Match, MatchSet};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::upsampled_span;
use crate::util::{DiffMatchError, DiffMatchResult};

impl<D> LevelSearch<'_, D>
where
    D: ColorDistance + ?Sized,
{
    /// Builds this level's matches from the parent level's.
    ///
    /// Only parents with `score < prune_below` are expanded. Each distinct
    /// child pair is scored once with cap `dist_cap`.
    pub fn propagate(
        &self,
        parent: &MatchSet,
        prune_below: f32,
        dist_cap: f32,
        half_height: bool,
        progress: &mut dyn Progress,
    ) -> DiffMatchResult<MatchSet> {
        let _span = trace_span!(
            "propagate_level",
            width = self.left().width(),
            parents = parent.len()
        )
        .entered();

        let mut scope = ProgressScope::enter(progress);
        let height = self.height();
        let left_width = self.left().width();
        let right_width = self.right().width();
        let total_rows = parent.rows().count();

        let mut low = RowSlices::new();
        let mut high = RowSlices::new();
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        let mut out = Vec::new();
        let mut survivors = 0usize;

        for (row_idx, row) in parent.rows().enumerate() {
            if scope.is_cancelled() {
                return Err(DiffMatchError::Cancelled);
            }
            scope.report(row_idx, total_rows);

            pairs.clear();
            for m in row.iter().filter(|m| m.score < prune_below) {
                survivors += 1;
                let (l0, l1) = upsampled_span(m.x_left, left_width);
                let (r0, r1) = upsampled_span(m.x_right, right_width);
                for x_left in l0..=l1 {
                    for x_right in r0..=r1 {
                        pairs.push((x_left, x_right));
                    }
                }
            }
            if pairs.is_empty() {
                continue;
            }
            pairs.sort_unstable();
            pairs.dedup();

            let parent_y = row[0].y;
            let (y_low, y_high) = if half_height {
                let upper = 2 * parent_y + 1;
                (2 * parent_y, (upper < height).then_some(upper))
            } else {
                (parent_y, None)
            };
            debug_assert!(y_low < height);
            trace_debug!("propagate_row", y = y_low, pairs = pairs.len());

            low.fill(self, y_low, &mut scope);
            let dc_low = low.correlation(self, dist_cap);
            let dc_high = match y_high {
                Some(y) => {
                    high.fill(self, y, &mut scope);
                    Some((y, high.correlation(self, dist_cap)))
                }
                None => None,
            };

            for &(x_left, x_right) in &pairs {
                out.push(Match {
                    y: y_low,
                    x_left,
                    x_right,
                    score: dc_low.cost(x_left, x_right),
                });
                if let Some((y, dc)) = &dc_high {
                    out.push(Match {
                        y: *y,
                        x_left,
                        x_right,
                        score: dc.cost(x_left, x_right),
                    });
                }
            }
        }

        let set = MatchSet::from_matches(out);
        trace_event!("propagated_matches", survivors = survivors, count = set.len());
        Ok(set)
    }
}
