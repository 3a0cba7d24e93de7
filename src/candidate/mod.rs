//! Per-pixel candidate selection and the sparse output tables.
//!
//! Level-0 matches are reduced to a best-first Top-K list per pixel and
//! stored in a CSR layout together with a window of neighbouring scores.

pub(crate) mod table;
pub(crate) mod topk;
