//! Diffmatch is a hierarchical, diffusion-weighted stereo correlation engine.
//!
//! Given rectified left and right colour-range pyramids it produces, for every
//! pixel of both full-resolution images, a short best-first list of candidate
//! x coordinates in the opposing image together with their correlation
//! scores and the scores of neighbouring offsets for subpixel refinement.
//! The coarsest level is searched exhaustively; finer levels only expand
//! matches that beat a per-level pruning threshold. The exhaustive coarse
//! level can run row-parallel via the `rayon` feature.

mod candidate;
pub mod diffusion;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod progress;
mod refine;
pub mod search;
mod trace;
pub mod util;

pub use candidate::table::CandidateTable;
pub use diffusion::{DiffusionWeight, Direction, RangeDiffusionSlice};
pub use image::distance::{CentreDistance, ColorDistance, RangeGapDistance};
pub use image::pyramid::RangePyramid;
pub use image::{LuvRange, RangeImage};
pub use kernel::{DiffuseCorrelation, MatchCost};
pub use progress::{NoProgress, Progress, ProgressScope};
pub use refine::quad1d::quad_min_offset_1d;
pub use search::{CorrelationConfig, DiffusionCorrelationImage, StereoCandidates};
pub use util::{DiffMatchError, DiffMatchResult};
