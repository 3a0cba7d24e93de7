//! Top-level stereo correlator over a pair of pyramids.

use crate::candidate::table::CandidateTable;
use crate::image::distance::ColorDistance;
use crate::image::pyramid::RangePyramid;
use crate::progress::{Progress, ProgressScope};
use crate::search::level::LevelSearch;
use crate::search::CorrelationConfig;
use crate::trace::{trace_event, trace_span};
use crate::util::{DiffMatchError, DiffMatchResult};

/// Candidate tables for both images of a pair.
#[derive(Clone, Debug)]
pub struct StereoCandidates {
    /// Candidates per left pixel; disparities are right-image x coordinates.
    pub left: CandidateTable,
    /// Candidates per right pixel; disparities are left-image x coordinates.
    pub right: CandidateTable,
}

/// Coarse-to-fine diffusion correlation between two rectified pyramids.
///
/// Borrows the pyramids and the distance for its whole lifetime. The result
/// of the last successful [`run`](Self::run) is kept and served by the query
/// accessors, which panic if no run has completed.
pub struct DiffusionCorrelationImage<'a, D: ?Sized> {
    distance: &'a D,
    dist_mult: f32,
    left: &'a RangePyramid,
    right: &'a RangePyramid,
    cfg: CorrelationConfig,
    output: Option<StereoCandidates>,
}

impl<'a, D> DiffusionCorrelationImage<'a, D>
where
    D: ColorDistance + ?Sized,
{
    /// Binds the distance, the diffusion multiplier and both pyramids.
    ///
    /// The pyramids must share the height-halving setting and have equal
    /// heights on every level used; widths may differ.
    pub fn new(
        distance: &'a D,
        dist_mult: f32,
        left: &'a RangePyramid,
        right: &'a RangePyramid,
    ) -> DiffMatchResult<Self> {
        if !dist_mult.is_finite() || dist_mult < 0.0 {
            return Err(DiffMatchError::InvalidConfig(
                "dist_mult must be finite and non-negative",
            ));
        }
        if left.half_height() != right.half_height() {
            return Err(DiffMatchError::PyramidMismatch {
                reason: "pyramids disagree on height halving",
            });
        }
        let levels = left.num_levels().min(right.num_levels());
        let heights_match = left.levels()[..levels]
            .iter()
            .zip(&right.levels()[..levels])
            .all(|(l, r)| l.height() == r.height());
        if !heights_match {
            return Err(DiffMatchError::PyramidMismatch {
                reason: "left and right heights differ",
            });
        }
        Ok(Self {
            distance,
            dist_mult,
            left,
            right,
            cfg: CorrelationConfig::default(),
            output: None,
        })
    }

    /// Replaces the run parameters.
    pub fn with_config(mut self, cfg: CorrelationConfig) -> Self {
        self.set_config(cfg);
        self
    }

    /// Replaces the run parameters, discarding any previous result.
    pub fn set_config(&mut self, cfg: CorrelationConfig) {
        self.cfg = cfg;
        self.output = None;
    }

    /// Current run parameters.
    pub fn config(&self) -> &CorrelationConfig {
        &self.cfg
    }

    /// Number of pyramid levels the run uses.
    pub fn levels(&self) -> usize {
        self.left.num_levels().min(self.right.num_levels())
    }

    /// Runs the full coarse-to-fine search and compaction.
    ///
    /// Progress reports `levels + 1` stages: one per pyramid level, then the
    /// compaction. On error (including cancellation) no result is kept.
    pub fn run(&mut self, progress: &mut dyn Progress) -> DiffMatchResult<&StereoCandidates> {
        self.output = None;
        self.cfg.validate()?;

        let (distance, left, right) = (self.distance, self.left, self.right);
        let levels = self.levels();
        let caps = self.cfg.dist_caps(levels);
        let half_height = left.half_height();
        let steps = self.cfg.steps;
        let coarsest = levels - 1;
        let total = levels + 1;

        let _span = trace_span!("correlate", levels = levels, steps = steps).entered();
        let mut scope = ProgressScope::enter(progress);

        scope.report(0, total);
        let mut search = LevelSearch::new(
            distance,
            self.dist_mult,
            steps,
            &left.levels()[coarsest],
            &right.levels()[coarsest],
            &mut scope,
        )?;
        let mut matches = search.brute_force(caps[coarsest], self.cfg.parallel, &mut scope)?;
        trace_event!("level_done", level = coarsest, matches = matches.len());

        for level in (0..coarsest).rev() {
            scope.report(coarsest - level, total);
            search = LevelSearch::new(
                distance,
                self.dist_mult,
                steps,
                &left.levels()[level],
                &right.levels()[level],
                &mut scope,
            )?;
            let prune_below = caps[level + 1] * self.cfg.dist_cap_threshold;
            matches = search.propagate(&matches, prune_below, caps[level], half_height, &mut scope)?;
            trace_event!("level_done", level = level, matches = matches.len());
        }

        scope.report(levels, total);
        let candidates = search.compact(
            &matches,
            caps[0],
            self.cfg.maxima_limit,
            self.cfg.range,
            &mut scope,
        )?;
        scope.report(total, total);

        Ok(self.output.insert(candidates))
    }

    /// Result of the last successful run, if any.
    pub fn candidates(&self) -> Option<&StereoCandidates> {
        self.output.as_ref()
    }

    /// Score window half-width the run was configured with.
    pub fn range(&self) -> usize {
        self.cfg.range
    }

    fn output(&self) -> &StereoCandidates {
        match &self.output {
            Some(out) => out,
            None => panic!("candidates queried before a successful run"),
        }
    }

    /// Number of candidates for left pixel `(x, y)`.
    pub fn count_left(&self, x: usize, y: usize) -> usize {
        self.output().left.count(x, y)
    }

    /// Right-image x of candidate `i` of left pixel `(x, y)`, best first.
    pub fn disparity_left(&self, x: usize, y: usize, i: usize) -> usize {
        self.output().left.disparity(x, y, i)
    }

    /// Score of candidate `i` of left pixel `(x, y)` at `offset`.
    pub fn score_left(&self, x: usize, y: usize, i: usize, offset: isize) -> f32 {
        self.output().left.score(x, y, i, offset)
    }

    /// Number of candidates for right pixel `(x, y)`.
    pub fn count_right(&self, x: usize, y: usize) -> usize {
        self.output().right.count(x, y)
    }

    /// Left-image x of candidate `i` of right pixel `(x, y)`, best first.
    pub fn disparity_right(&self, x: usize, y: usize, i: usize) -> usize {
        self.output().right.disparity(x, y, i)
    }

    /// Score of candidate `i` of right pixel `(x, y)` at `offset`.
    pub fn score_right(&self, x: usize, y: usize, i: usize, offset: isize) -> f32 {
        self.output().right.score(x, y, i, offset)
    }
}
