// Similarity measure trait: the seam between scoring and set comparison.
//
// simRel is the measure Mega-GO reports, but Lin and Resnik are computed from
// the same ingredients (IC of both terms and of their MICA). The set-level
// code only talks to this trait.

use super::context::SemanticContext;
use crate::ontology::GoId;

/// A term-to-term semantic similarity.
pub trait SimilarityMeasure {
    /// Short lowercase name used in reports (`rel`, `lin`, `resnik`).
    fn name(&self) -> &'static str;

    /// Similarity of two primary GO ids.
    ///
    /// Returns `None` when either term is unknown or the two terms sit in
    /// different namespaces. Implementations must be symmetric.
    fn similarity(&self, ctx: &SemanticContext<'_>, a: GoId, b: GoId) -> Option<f64>;
}
