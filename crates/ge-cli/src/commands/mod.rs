//! Command implementations.

pub mod estimate;
pub mod report;
pub mod util;
