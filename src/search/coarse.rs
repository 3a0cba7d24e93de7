//! Exhaustive search at the coarsest pyramid level.
//!
//! Every `(x_left, x_right)` pair of every scanline is scored. This is
//! `O(W^2 * H)` and is only affordable because the coarsest level is small.

use crate::image::distance::ColorDistance;
use crate::kernel::MatchCost;
use crate::progress::{Progress, ProgressScope};
use crate::search::level::{LevelSearch, RowSlices};
use crate::search::matches::{Match, MatchSet};
use crate::trace::{trace_event, trace_span};
use crate::util::{DiffMatchError, DiffMatchResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

impl<D> LevelSearch<'_, D>
where
    D: ColorDistance + ?Sized,
{
    /// Scores all pixel pairs of every scanline with cap `dist_cap`.
    ///
    /// With `parallel` the scanlines are evaluated on the rayon pool; the
    /// result is identical to the sequential path.
    pub fn brute_force(
        &self,
        dist_cap: f32,
        parallel: bool,
        progress: &mut dyn Progress,
    ) -> DiffMatchResult<MatchSet> {
        let _span = trace_span!(
            "coarse_level",
            width = self.left().width(),
            height = self.height(),
            parallel = parallel
        )
        .entered();

        let set = if parallel {
            self.brute_force_par(dist_cap, progress)?
        } else {
            self.brute_force_seq(dist_cap, progress)?
        };

        trace_event!("coarse_matches", count = set.len());
        Ok(set)
    }

    fn brute_force_seq(
        &self,
        dist_cap: f32,
        progress: &mut dyn Progress,
    ) -> DiffMatchResult<MatchSet> {
        let mut scope = ProgressScope::enter(progress);
        let height = self.height();
        let mut slices = RowSlices::new();
        let mut out = Vec::with_capacity(self.left().width() * self.right().width() * height);
        for y in 0..height {
            if scope.is_cancelled() {
                return Err(DiffMatchError::Cancelled);
            }
            scope.report(y, height);
            slices.fill(self, y, &mut scope);
            self.score_row(&slices, y, dist_cap, &mut out);
        }
        Ok(MatchSet::from_matches(out))
    }

    #[cfg(feature = "rayon")]
    fn brute_force_par(
        &self,
        dist_cap: f32,
        progress: &mut dyn Progress,
    ) -> DiffMatchResult<MatchSet> {
        if progress.is_cancelled() {
            return Err(DiffMatchError::Cancelled);
        }
        let height = self.height();
        progress.report(0, height);
        let rows: Vec<Vec<Match>> = (0..height)
            .into_par_iter()
            .map(|y| {
                let mut slices = RowSlices::new();
                slices.fill(self, y, &mut crate::progress::NoProgress);
                let mut row = Vec::with_capacity(self.left().width() * self.right().width());
                self.score_row(&slices, y, dist_cap, &mut row);
                row
            })
            .collect();
        progress.report(height, height);
        Ok(MatchSet::from_matches(rows.into_iter().flatten().collect()))
    }

    #[cfg(not(feature = "rayon"))]
    fn brute_force_par(
        &self,
        _dist_cap: f32,
        _progress: &mut dyn Progress,
    ) -> DiffMatchResult<MatchSet> {
        Err(DiffMatchError::InvalidConfig(
            "parallel requires the rayon feature",
        ))
    }

    fn score_row(&self, slices: &RowSlices, y: usize, dist_cap: f32, out: &mut Vec<Match>) {
        let dc = slices.correlation(self, dist_cap);
        for x_left in 0..self.left().width() {
            for x_right in 0..self.right().width() {
                out.push(Match {
                    y,
                    x_left,
                    x_right,
                    score: dc.cost(x_left, x_right),
                });
            }
        }
    }
}
