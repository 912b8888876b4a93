// Set-to-set similarity with the best-match average (BMA).
//
// For two term sets A and B of the same namespace:
//
//   BMA(A, B) = ( mean_{a in A} max_{b in B} s(a, b)
//               + mean_{b in B} max_{a in A} s(a, b) ) / 2
//
// Terms from different namespaces are never compared, so a comparison yields
// one score per namespace. A namespace where either side has no terms has no
// score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::context::SemanticContext;
use super::traits::SimilarityMeasure;
use crate::input::TermSet;
use crate::ontology::{GoId, Namespace};

/// One optional score per namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetSimilarity {
    #[serde(rename = "BPO")]
    pub biological_process: Option<f64>,
    #[serde(rename = "CCO")]
    pub cellular_component: Option<f64>,
    #[serde(rename = "MFO")]
    pub molecular_function: Option<f64>,
}

impl SetSimilarity {
    pub fn get(&self, namespace: Namespace) -> Option<f64> {
        match namespace {
            Namespace::BiologicalProcess => self.biological_process,
            Namespace::CellularComponent => self.cellular_component,
            Namespace::MolecularFunction => self.molecular_function,
        }
    }

    fn set(&mut self, namespace: Namespace, score: Option<f64>) {
        match namespace {
            Namespace::BiologicalProcess => self.biological_process = score,
            Namespace::CellularComponent => self.cellular_component = score,
            Namespace::MolecularFunction => self.molecular_function = score,
        }
    }
}

/// Scores term pairs through a measure, memoizing each unordered pair.
///
/// Reuse one comparer across many set comparisons (e.g. a file matrix) so
/// pairs shared between comparisons are computed once.
pub struct SetComparer<'a> {
    ctx: SemanticContext<'a>,
    measure: &'a dyn SimilarityMeasure,
    cache: HashMap<(GoId, GoId), Option<f64>>,
    hits: u64,
}

impl<'a> SetComparer<'a> {
    pub fn new(ctx: SemanticContext<'a>, measure: &'a dyn SimilarityMeasure) -> Self {
        Self {
            ctx,
            measure,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    pub fn measure_name(&self) -> &'static str {
        self.measure.name()
    }

    /// Cached term similarity. Measures are symmetric so the key is ordered.
    pub fn term_similarity(&mut self, a: GoId, b: GoId) -> Option<f64> {
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(score) = self.cache.get(&key) {
            self.hits += 1;
            return *score;
        }
        let score = self.measure.similarity(&self.ctx, key.0, key.1);
        self.cache.insert(key, score);
        score
    }

    /// Mean over `from` of the best score against any term of `to`.
    fn directed_best_match(&mut self, from: &[GoId], to: &[GoId]) -> Option<f64> {
        let mut total = 0.0;
        let mut scored = 0usize;
        for a in from {
            let best = to
                .iter()
                .filter_map(|b| self.term_similarity(*a, *b))
                .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |m| m.max(s))));
            if let Some(best) = best {
                total += best;
                scored += 1;
            }
        }
        (scored > 0).then(|| total / scored as f64)
    }

    pub fn best_match_average(&mut self, a: &[GoId], b: &[GoId]) -> Option<f64> {
        if a.is_empty() || b.is_empty() {
            return None;
        }
        let forward = self.directed_best_match(a, b)?;
        let backward = self.directed_best_match(b, a)?;
        Some((forward + backward) / 2.0)
    }

    /// Per-namespace BMA of two term sets.
    pub fn compare(&mut self, a: &TermSet, b: &TermSet) -> SetSimilarity {
        let mut result = SetSimilarity::default();
        for namespace in Namespace::ALL {
            let left = a.namespace_terms(namespace);
            let right = b.namespace_terms(namespace);
            let score = self.best_match_average(&left, &right);
            result.set(namespace, score);
        }
        result
    }

    /// Mean similarity over all unordered pairs of distinct terms.
    ///
    /// Describes how coherent a single set is. `None` for fewer than two
    /// terms.
    pub fn mean_pairwise(&mut self, terms: &[GoId]) -> Option<f64> {
        let mut total = 0.0;
        let mut pairs = 0usize;
        for (i, a) in terms.iter().enumerate() {
            for b in &terms[i + 1..] {
                if let Some(score) = self.term_similarity(*a, *b) {
                    total += score;
                    pairs += 1;
                }
            }
        }
        (pairs > 0).then(|| total / pairs as f64)
    }

    /// (distinct pairs computed, cache hits)
    pub fn cache_stats(&self) -> (usize, u64) {
        (self.cache.len(), self.hits)
    }
}

/// Uncached BMA of two term lists.
pub fn best_match_average(
    ctx: SemanticContext<'_>,
    measure: &dyn SimilarityMeasure,
    a: &[GoId],
    b: &[GoId],
) -> Option<f64> {
    SetComparer::new(ctx, measure).best_match_average(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_similarity_accessors() {
        let mut s = SetSimilarity::default();
        s.set(Namespace::CellularComponent, Some(0.5));
        assert_eq!(s.get(Namespace::CellularComponent), Some(0.5));
        assert_eq!(s.get(Namespace::BiologicalProcess), None);
    }

    #[test]
    fn test_serializes_with_short_labels() {
        let s = SetSimilarity {
            biological_process: Some(0.25),
            cellular_component: None,
            molecular_function: Some(1.0),
        };
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["BPO"], 0.25);
        assert!(json["CCO"].is_null());
        assert_eq!(json["MFO"], 1.0);
    }
}
