//! Tally core: label counting and most-common ranking.
mod counter;
mod ranking;

pub use counter::Counter;
pub use ranking::{Order, Ranking};
