// Semantic similarity between GO terms and between sets of GO terms.

pub mod bma;
pub mod context;
pub mod measures;
pub mod traits;

pub use bma::{best_match_average, SetComparer, SetSimilarity};
pub use context::SemanticContext;
pub use measures::{Lin, Measure, Resnik, SimRel};
pub use traits::SimilarityMeasure;
