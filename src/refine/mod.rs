//! Subpixel refinement of integer disparities.

pub(crate) mod quad1d;
