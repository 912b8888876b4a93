// Everything a similarity measure needs to look at: the ontology, the
// ancestor closure and the annotation counts.

use crate::annotations::TermCounts;
use crate::ontology::{AncestorIndex, GoDag, GoId};

/// Information-content view of two terms and their most informative common
/// ancestor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedInformation {
    pub ic_a: f64,
    pub ic_b: f64,
    pub mica: GoId,
    pub ic_mica: f64,
    pub frequency_mica: f64,
}

/// Borrowed view over the loaded resources.
#[derive(Debug, Clone, Copy)]
pub struct SemanticContext<'a> {
    pub dag: &'a GoDag,
    pub ancestors: &'a AncestorIndex,
    pub counts: &'a TermCounts,
}

impl<'a> SemanticContext<'a> {
    pub fn new(dag: &'a GoDag, ancestors: &'a AncestorIndex, counts: &'a TermCounts) -> Self {
        Self {
            dag,
            ancestors,
            counts,
        }
    }

    pub fn information_content(&self, id: GoId) -> f64 {
        self.counts.information_content(id)
    }

    pub fn frequency(&self, id: GoId) -> f64 {
        self.counts.frequency(id)
    }

    /// Most informative common ancestor of `a` and `b`.
    ///
    /// Ties on IC go to the smallest id. `None` when the terms are unknown,
    /// in different namespaces, or share no ancestor.
    pub fn mica(&self, a: GoId, b: GoId) -> Option<GoId> {
        let ns_a = self.dag.namespace(a)?;
        let ns_b = self.dag.namespace(b)?;
        if ns_a != ns_b {
            return None;
        }

        let mut best: Option<(GoId, f64)> = None;
        // common_ancestors is ascending, so a strict comparison keeps the
        // smallest id among equal ICs.
        for candidate in self.ancestors.common_ancestors(a, b) {
            let ic = self.information_content(candidate);
            match best {
                Some((_, best_ic)) if ic <= best_ic => {}
                _ => best = Some((candidate, ic)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// IC of both terms and of their MICA, or `None` if the pair cannot be
    /// scored.
    pub fn shared_information(&self, a: GoId, b: GoId) -> Option<SharedInformation> {
        let mica = self.mica(a, b)?;
        Some(SharedInformation {
            ic_a: self.information_content(a),
            ic_b: self.information_content(b),
            mica,
            ic_mica: self.information_content(mica),
            frequency_mica: self.frequency(mica),
        })
    }
}
