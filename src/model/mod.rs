pub mod categories;
pub mod flags;
pub mod results;
pub mod scores;
pub mod stats;
pub mod thresholds;
