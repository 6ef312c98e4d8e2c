//! Category matching
//!
//! Maps a lot's free-text category name to the best dismantling
//! configuration in the catalog using an accent-insensitive token score.

pub mod normalize;
pub mod similarity;
pub mod category_matcher;

pub use category_matcher::{CategoryMatch, CategoryMatcher, MatcherConfig};
pub use normalize::normalize;
pub use similarity::similarity;
