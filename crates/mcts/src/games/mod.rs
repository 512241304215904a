//! Test game implementations for search validation.
//!
//! These games have outcomes that are easy to reason about, so tests can
//! check which turn a player should pick.

pub mod tally;

pub use tally::{Tally, TallyAction, TallyScore, TallyState};
