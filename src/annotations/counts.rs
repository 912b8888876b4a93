// Annotation counts and information content.
//
// A protein annotated to a term is implicitly annotated to all of that
// term's ancestors. Each term is counted at most once per protein, so the
// count of a namespace root is the number of proteins with any annotation in
// that namespace. Frequencies are relative to that root:
//
//   p(t)  = count(t) / count(root(t))
//   IC(t) = -ln p(t)        (0 when p(t) = 0)

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::associations::Associations;
use crate::ontology::{AncestorIndex, GoDag, GoId, Namespace};

#[derive(Debug, Clone, Copy)]
struct TermCount {
    namespace: Namespace,
    count: u64,
}

/// Propagated annotation counts for every annotated term.
#[derive(Debug, Default, Clone)]
pub struct TermCounts {
    counts: HashMap<GoId, TermCount>,
    /// Proteins whose terms were all unknown to the ontology.
    pub unusable_proteins: usize,
}

impl TermCounts {
    pub fn new(dag: &GoDag, index: &AncestorIndex, associations: &Associations) -> Self {
        let mut term_counts = TermCounts::default();
        let mut unresolved = 0usize;

        for (_accession, terms) in associations.iter() {
            let mut closure: HashSet<GoId> = HashSet::new();
            for term in terms {
                match dag.resolve(*term).term().and_then(|t| index.ancestors(t)) {
                    Some(ancestors) => closure.extend(ancestors.iter().copied()),
                    None => unresolved += 1,
                }
            }

            if closure.is_empty() {
                term_counts.unusable_proteins += 1;
                continue;
            }

            for term in closure {
                let Some(namespace) = dag.namespace(term) else {
                    continue;
                };
                term_counts
                    .counts
                    .entry(term)
                    .or_insert(TermCount {
                        namespace,
                        count: 0,
                    })
                    .count += 1;
            }
        }

        if unresolved > 0 {
            debug!(
                unresolved,
                "Association terms not found in the ontology were ignored"
            );
        }
        info!(
            terms = term_counts.counts.len(),
            bpo = term_counts.root_count(Namespace::BiologicalProcess),
            cco = term_counts.root_count(Namespace::CellularComponent),
            mfo = term_counts.root_count(Namespace::MolecularFunction),
            "Computed term counts"
        );
        term_counts
    }

    /// Number of proteins annotated to `id` or one of its descendants.
    pub fn count(&self, id: GoId) -> u64 {
        self.counts.get(&id).map_or(0, |c| c.count)
    }

    /// Number of proteins with any annotation in `namespace`.
    pub fn root_count(&self, namespace: Namespace) -> u64 {
        self.count(namespace.root())
    }

    /// Number of distinct terms with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Annotation frequency relative to the namespace root, in `[0, 1]`.
    pub fn frequency(&self, id: GoId) -> f64 {
        let Some(entry) = self.counts.get(&id) else {
            return 0.0;
        };
        let root = self.root_count(entry.namespace);
        if root == 0 {
            0.0
        } else {
            entry.count as f64 / root as f64
        }
    }

    pub fn information_content(&self, id: GoId) -> f64 {
        let freq = self.frequency(id);
        if freq > 0.0 {
            -freq.ln()
        } else {
            0.0
        }
    }
}
