pub mod accuracy;
pub mod logger;

pub use accuracy::{accuracy_score, sample_correct};
pub use logger::{Position, ProgressIter, ProgressLogger};
