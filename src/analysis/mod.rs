//! Analysis modules.
//!
//! The aggregation core: pure functions turning per-dimension metric
//! tables into ranked leaderboard data.

pub mod aggregator;

pub use aggregator::*;
