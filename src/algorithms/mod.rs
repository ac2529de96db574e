//! Belief-update algorithms: the blur kernel and the filter cycle.

pub mod blur;
pub mod filter;
