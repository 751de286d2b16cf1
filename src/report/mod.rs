//! Report generation modules.

pub mod generator;
pub mod statistics;

pub use generator::*;
pub use statistics::*;
