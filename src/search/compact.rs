//! Reduction of level-0 matches to per-pixel candidate tables.
//!
//! Each side is built independently: left pixels group matches by
//! `x_left`, right pixels by `x_right`. A pixel keeps at most `maxima_limit`
//! candidates, best first, and each candidate stores the scores of the
//! opposing x shifted by `-range..=range`.

use crate::candidate::table::CandidateTableBuilder;
use crate::candidate::topk::{Candidate, TopK};
use crate::image::distance::ColorDistance;
use crate::kernel::MatchCost;
use crate::progress::{Progress, ProgressScope};
use crate::search::correlator::StereoCandidates;
use crate::search::level::{LevelSearch, RowSlices};
use crate::search::matches::MatchSet;
use crate::trace::{trace_event, trace_span};
use crate::util::math::shift_index;
use crate::util::{DiffMatchError, DiffMatchResult};

impl<D> LevelSearch<'_, D>
where
    D: ColorDistance + ?Sized,
{
    /// Compacts this level's `matches` into candidate tables for both images.
    ///
    /// Window scores reuse `matches` when the shifted pair was already
    /// evaluated, call the correlation otherwise, and fall back to `dist_cap`
    /// when the shifted x leaves the opposing image.
    pub fn compact(
        &self,
        matches: &MatchSet,
        dist_cap: f32,
        maxima_limit: usize,
        range: usize,
        progress: &mut dyn Progress,
    ) -> DiffMatchResult<StereoCandidates> {
        let _span = trace_span!("compact_candidates", matches = matches.len()).entered();

        let mut scope = ProgressScope::enter(progress);
        let height = self.height();
        let left_width = self.left().width();
        let right_width = self.right().width();
        let r = range as isize;

        let mut left_out = CandidateTableBuilder::new(left_width, height, range);
        let mut right_out = CandidateTableBuilder::new(right_width, height, range);
        let mut slices = RowSlices::new();

        for y in 0..height {
            if scope.is_cancelled() {
                return Err(DiffMatchError::Cancelled);
            }
            scope.report(y, height);

            let row = matches.row(y);
            if row.is_empty() {
                left_out.skip_pixels(left_width);
                right_out.skip_pixels(right_width);
                continue;
            }

            // A pixel can never collect more distinct disparities than the
            // opposing width.
            let left_k = maxima_limit.min(right_width);
            let right_k = maxima_limit.min(left_width);
            let mut left_best: Vec<TopK> = (0..left_width).map(|x| TopK::new(left_k, x)).collect();
            let mut right_best: Vec<TopK> =
                (0..right_width).map(|x| TopK::new(right_k, x)).collect();
            for m in row {
                left_best[m.x_left].push(Candidate {
                    disparity: m.x_right,
                    score: m.score,
                });
                right_best[m.x_right].push(Candidate {
                    disparity: m.x_left,
                    score: m.score,
                });
            }

            slices.fill(self, y, &mut scope);
            let dc = slices.correlation(self, dist_cap);

            for (x_left, best) in left_best.into_iter().enumerate() {
                for cand in best.into_sorted() {
                    let window = (-r..=r).map(|o| match shift_index(cand.disparity, o, right_width) {
                        Some(x_right) => matches
                            .score(y, x_left, x_right)
                            .unwrap_or_else(|| dc.cost(x_left, x_right)),
                        None => dist_cap,
                    });
                    left_out.push(cand.disparity, window);
                }
                left_out.end_pixel();
            }

            for (x_right, best) in right_best.into_iter().enumerate() {
                for cand in best.into_sorted() {
                    let window = (-r..=r).map(|o| match shift_index(cand.disparity, o, left_width) {
                        Some(x_left) => matches
                            .score(y, x_left, x_right)
                            .unwrap_or_else(|| dc.cost(x_left, x_right)),
                        None => dist_cap,
                    });
                    right_out.push(cand.disparity, window);
                }
                right_out.end_pixel();
            }
        }

        let left = left_out.finish();
        let right = right_out.finish();
        trace_event!(
            "candidates",
            left = left.total_candidates(),
            right = right.total_candidates()
        );
        Ok(StereoCandidates { left, right })
    }
}
