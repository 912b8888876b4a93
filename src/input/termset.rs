// Resolved GO term sets.
//
// A TermSet holds the primary GO ids of one input, grouped by namespace, and
// keeps a record of everything that could not be used as-is so the stats
// command can report it.

use std::collections::{BTreeMap, BTreeSet};

use super::ParsedInput;
use crate::annotations::Associations;
use crate::ontology::{GoDag, GoId, Namespace, Resolution};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermSet {
    terms: BTreeMap<Namespace, BTreeSet<GoId>>,
    /// GO ids that are not in the ontology.
    pub unknown: BTreeSet<GoId>,
    /// Obsolete GO ids without a usable replacement.
    pub obsolete: BTreeSet<GoId>,
    /// Alternate ids mapped to their primary term.
    pub remapped: BTreeSet<(GoId, GoId)>,
    /// Obsolete ids mapped to their `replaced_by` term.
    pub replaced: BTreeSet<(GoId, GoId)>,
    /// Accessions with no entry in the association table.
    pub unmapped_accessions: Vec<String>,
    /// Accessions found in the association table.
    pub mapped_accessions: usize,
}

impl TermSet {
    /// Resolve a parsed input against the ontology and the associations.
    pub fn build(input: &ParsedInput, dag: &GoDag, associations: &Associations) -> Self {
        let mut set = TermSet::default();

        for id in &input.go_ids {
            set.add(*id, dag);
        }

        for accession in &input.accessions {
            match associations.lookup(accession) {
                Some(terms) => {
                    set.mapped_accessions += 1;
                    for id in terms {
                        set.add(*id, dag);
                    }
                }
                None => set.unmapped_accessions.push(accession.clone()),
            }
        }

        set
    }

    /// Resolve a plain collection of GO ids.
    pub fn from_ids(ids: impl IntoIterator<Item = GoId>, dag: &GoDag) -> Self {
        let mut set = TermSet::default();
        for id in ids {
            set.add(id, dag);
        }
        set
    }

    fn add(&mut self, id: GoId, dag: &GoDag) {
        let resolution = dag.resolve(id);
        match resolution {
            Resolution::Current(_) => {}
            Resolution::Alternate { from, to } => {
                self.remapped.insert((from, to));
            }
            Resolution::Replaced { from, to } => {
                self.replaced.insert((from, to));
            }
            Resolution::Obsolete(from) => {
                self.obsolete.insert(from);
            }
            Resolution::Unknown(from) => {
                self.unknown.insert(from);
            }
        }

        if let Some(primary) = resolution.term() {
            if let Some(namespace) = dag.namespace(primary) {
                self.terms.entry(namespace).or_default().insert(primary);
            }
        }
    }

    /// Terms of one namespace in ascending id order.
    pub fn namespace_terms(&self, namespace: Namespace) -> Vec<GoId> {
        self.terms
            .get(&namespace)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, namespace: Namespace) -> usize {
        self.terms.get(&namespace).map_or(0, BTreeSet::len)
    }

    pub fn contains(&self, id: GoId) -> bool {
        self.terms.values().any(|set| set.contains(&id))
    }

    /// Number of distinct usable terms across all namespaces.
    pub fn len(&self) -> usize {
        self.terms.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
