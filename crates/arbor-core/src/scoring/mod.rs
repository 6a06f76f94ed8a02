//! Relevance scoring and the prize/cost model.

mod prizes;
mod similarity;

pub use prizes::*;
pub use similarity::*;
