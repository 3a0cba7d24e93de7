//! Low-level building blocks for custom correlation pipelines.
//!
//! These expose the per-level search stages and the match containers used
//! between them. Most users should prefer [`DiffusionCorrelationImage`].
//!
//! [`DiffusionCorrelationImage`]: crate::DiffusionCorrelationImage

pub use crate::diffusion::{DiffusionWeight, Direction, RangeDiffusionSlice};
pub use crate::kernel::{DiffuseCorrelation, MatchCost};
pub use crate::refine::quad1d::quad_min_offset_1d;
pub use crate::search::{LevelSearch, Match, MatchSet};
